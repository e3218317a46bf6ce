#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::debug;
use pokecatalog::api::CatalogApi;
use pokecatalog::config::Config;
use pokecatalog::entities::{ImageUpload, PokemonId, Tipo, TipoId};
use pokecatalog::error::{DisplayableError, Notice};
use pokecatalog::screens::{
    CreatePokemon, CreatePokemonMessage, DetailStatus, EditPokemon,
    EditPokemonMessage, EditStep, LoadStatus, PokemonDetail, PokemonList,
};
use pokecatalog::utils::{tipo_names, Client};
use pokecatalog::widgets::TipoSelectorMessage;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    #[arg(
        long,
        env = "POKECATALOG_BASE_URL",
        default_value = Config::BASE_URL,
        help = "Base URL of the catalog service"
    )]
    base_url: String,
    #[arg(
        long,
        default_value_t = Config::DEFAULT_TIMEOUT_SECS,
        help = "Request timeout in seconds"
    )]
    timeout: u64,
    #[clap(subcommand)]
    subcommand: SubCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubCommand {
    #[clap(about = "List all Pokémon")]
    List,
    #[clap(about = "Show a single Pokémon")]
    Show { id: u64 },
    #[clap(about = "List the assignable tipos")]
    Tipos,
    #[clap(about = "Create a Pokémon and assign its tipos")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, help = "JPEG, PNG, GIF or WEBP file")]
        image: PathBuf,
        #[arg(long = "tipo", required = true, help = "Tipo id, repeatable")]
        tipos: Vec<u64>,
    },
    #[clap(about = "Rename a Pokémon, replace its image and revise its tipos")]
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(
            long = "tipo",
            help = "Tipo id, repeatable; current tipos are kept if omitted"
        )]
        tipos: Vec<u64>,
    },
    #[clap(about = "Delete a Pokémon")]
    Delete {
        id: u64,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

impl CliArgs {
    pub fn config(&self) -> Config {
        Config::new(&self.base_url, Duration::from_secs(self.timeout))
    }

    pub async fn run(&self) -> Result<(), DisplayableError> {
        let config = self.config();
        debug!("Using catalog service at {}", config.base_url);
        let client = Client::new(&config).map_err(|e| {
            DisplayableError::describe(&e, "Failed to set up the HTTP client")
        })?;
        let api: &dyn CatalogApi = &client;

        match &self.subcommand {
            SubCommand::List => list(api).await,
            SubCommand::Show { id } => show(api, PokemonId::new(*id)).await,
            SubCommand::Tipos => tipos(api).await,
            SubCommand::Create { name, image, tipos } => {
                create(api, name, image, tipos).await
            }
            SubCommand::Edit {
                id,
                name,
                image,
                tipos,
            } => {
                edit(
                    api,
                    PokemonId::new(*id),
                    name.as_deref(),
                    image.as_deref(),
                    tipos,
                )
                .await
            }
            SubCommand::Delete { id, yes } => {
                delete(api, PokemonId::new(*id), *yes).await
            }
        }
    }
}

async fn list(api: &dyn CatalogApi) -> Result<(), DisplayableError> {
    let mut screen = PokemonList::new();
    screen.load(api).await;
    if let LoadStatus::Failed(message) = screen.status() {
        return Err(DisplayableError::new(message.clone()));
    }
    for pokemon in screen.records() {
        println!(
            "{}\t{}\t{}",
            pokemon.id,
            pokemon.name,
            tipo_names(&pokemon.tipos)
        );
    }
    Ok(())
}

async fn show(
    api: &dyn CatalogApi,
    id: PokemonId,
) -> Result<(), DisplayableError> {
    let mut screen = PokemonDetail::new();
    screen.load(api, id).await;
    match screen.status() {
        DetailStatus::Ready(pokemon) => {
            println!("Id:     {}", pokemon.id);
            println!("Name:   {}", pokemon.name);
            println!("Image:  {}", pokemon.image_url);
            println!("Tipos:  {}", tipo_names(&pokemon.tipos));
            Ok(())
        }
        DetailStatus::NotFound => {
            Err(DisplayableError::new(format!("Pokémon {id} not found")))
        }
        DetailStatus::Failed(message) => {
            Err(DisplayableError::new(message.clone()))
        }
        DetailStatus::Loading => {
            Err(DisplayableError::new(format!("Pokémon {id} did not load")))
        }
    }
}

async fn tipos(api: &dyn CatalogApi) -> Result<(), DisplayableError> {
    let catalog = api
        .list_tipos()
        .await
        .map_err(|e| DisplayableError::describe(&e, "Failed to load tipos"))?;
    for tipo in catalog {
        println!("{}\t{}", tipo.id, tipo.name);
    }
    Ok(())
}

async fn create(
    api: &dyn CatalogApi,
    name: &str,
    image: &Path,
    tipos: &[u64],
) -> Result<(), DisplayableError> {
    let mut screen = CreatePokemon::new();
    screen.load_tipos(api).await?;
    let tipos = known_tipos(screen.catalog(), tipos)?;
    screen.update(CreatePokemonMessage::NameEdited(name.to_string()));
    screen.update(CreatePokemonMessage::ImageSelected(Some(
        read_image(image).await?,
    )));

    report(screen.submit(api).await?);
    for id in tipos {
        screen.update(CreatePokemonMessage::Tipo(TipoSelectorMessage::Select(
            id,
        )));
    }
    report(screen.confirm_tipos(api).await?);
    Ok(())
}

async fn edit(
    api: &dyn CatalogApi,
    id: PokemonId,
    name: Option<&str>,
    image: Option<&Path>,
    tipos: &[u64],
) -> Result<(), DisplayableError> {
    let mut screen = EditPokemon::new(id);
    screen.load(api).await;
    ready_to_edit(id, screen.step())?;

    if let Some(name) = name {
        screen.update(EditPokemonMessage::NameEdited(name.to_string()));
    }
    if let Some(image) = image {
        screen.update(EditPokemonMessage::ImageSelected(Some(
            read_image(image).await?,
        )));
    }
    report(screen.submit(api).await?);

    if let Err(e) = screen.open_tipos(api).await {
        eprintln!("{e}");
    }
    if !tipos.is_empty() {
        let options =
            screen.selector().map(|s| s.options()).unwrap_or_default();
        let ids = known_tipos(options, tipos)?;
        screen.update(EditPokemonMessage::Tipo(TipoSelectorMessage::Clear));
        for id in ids {
            screen.update(EditPokemonMessage::Tipo(
                TipoSelectorMessage::Select(id),
            ));
        }
    }
    report(screen.confirm_tipos(api).await?);
    Ok(())
}

async fn delete(
    api: &dyn CatalogApi,
    id: PokemonId,
    yes: bool,
) -> Result<(), DisplayableError> {
    let mut screen = PokemonList::new();
    screen.load(api).await;
    if let LoadStatus::Failed(message) = screen.status() {
        return Err(DisplayableError::new(message.clone()));
    }
    let name = screen
        .records()
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .ok_or_else(|| {
            DisplayableError::new(format!("Pokémon {id} not found"))
        })?;

    screen.request_delete(id, &name);
    if !yes {
        if !atty::is(atty::Stream::Stdin) {
            screen.cancel_delete();
            return Err(DisplayableError::new(
                "Not a terminal; pass --yes to delete without confirmation",
            ));
        }
        if !confirm_default_no(&format!(
            "Delete {name}? This cannot be undone."
        )) {
            screen.cancel_delete();
            eprintln!("Delete aborted.");
            return Ok(());
        }
    }
    report(screen.confirm_delete(api).await?);
    Ok(())
}

/// Turn a settled edit load into an error unless it can be edited.
fn ready_to_edit(
    id: PokemonId,
    step: &EditStep,
) -> Result<(), DisplayableError> {
    match step {
        EditStep::Ready => Ok(()),
        EditStep::NotFound => {
            Err(DisplayableError::new(format!("Pokémon {id} not found")))
        }
        EditStep::Failed(message) => {
            Err(DisplayableError::new(message.clone()))
        }
        other => Err(DisplayableError::new(format!(
            "Pokémon {id} is not ready to edit ({other:?})"
        ))),
    }
}

fn report(notice: Notice) {
    println!("{notice}");
}

async fn read_image(path: &Path) -> Result<ImageUpload, DisplayableError> {
    ImageUpload::from_path(path).await.map_err(|e| {
        DisplayableError::new(format!("Cannot read {}: {e}", path.display()))
    })
}

/// Reject ids that are not in the tipo catalog.
fn known_tipos(
    options: &[Tipo],
    ids: &[u64],
) -> Result<Vec<TipoId>, DisplayableError> {
    ids.iter()
        .map(|&id| {
            let id = TipoId::new(id);
            if options.iter().any(|t| t.id == id) {
                Ok(id)
            } else {
                Err(DisplayableError::new(format!("Unknown tipo {id}")))
            }
        })
        .collect()
}

fn confirm_default_no(msg: &str) -> bool {
    print!("{msg} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut s = String::new();
    // OK to discard: will just reject on error as desired.
    let _ = io::stdin().read_line(&mut s);
    let s = s.trim().to_lowercase();
    s == "y"
}
