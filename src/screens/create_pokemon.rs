use log::{error, info, warn};

use crate::api::CatalogApi;
use crate::entities::{ImageUpload, NewPokemon, PokemonId, PokemonPatch, Tipo};
use crate::error::{DisplayableError, Notice};
use crate::widgets::{TipoSelector, TipoSelectorMessage};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CreateStep {
    #[default]
    Editing,
    Submitting,
    /// The Pokémon exists; its tipos are being picked.
    AwaitingTipos(PokemonId),
    /// Tipos saved, the caller should navigate away.
    Done,
}

#[derive(Clone, Debug)]
pub enum CreatePokemonMessage {
    NameEdited(String),
    ImageSelected(Option<ImageUpload>),
    Tipo(TipoSelectorMessage),
}

/// Create a Pokémon, then assign its tipos.
#[derive(Debug, Default)]
pub struct CreatePokemon {
    form: NewPokemon,
    catalog: Vec<Tipo>,
    step: CreateStep,
    selector: Option<TipoSelector>,
}

impl CreatePokemon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> CreateStep {
        self.step
    }

    pub fn form(&self) -> &NewPokemon {
        &self.form
    }

    /// Tipos offered once the Pokémon exists; empty until loaded.
    pub fn catalog(&self) -> &[Tipo] {
        &self.catalog
    }

    pub fn selector(&self) -> Option<&TipoSelector> {
        self.selector.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.step == CreateStep::Done
    }

    /// Fetch the tipo catalog offered once the Pokémon is created.
    ///
    /// An open tipo step is rebuilt over the new catalog, keeping the
    /// picks that still exist.
    pub async fn load_tipos(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<(), DisplayableError> {
        match api.list_tipos().await {
            Ok(catalog) => {
                if let Some(selector) = &mut self.selector {
                    let picked = selector.get_value();
                    *selector = TipoSelector::new(catalog.clone(), picked);
                }
                self.catalog = catalog;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load tipos: {e}");
                Err(DisplayableError::describe(&e, "Failed to load tipos"))
            }
        }
    }

    pub fn update(&mut self, message: CreatePokemonMessage) {
        match message {
            CreatePokemonMessage::NameEdited(name) => self.form.name = name,
            CreatePokemonMessage::ImageSelected(image) => {
                self.form.image = image;
            }
            CreatePokemonMessage::Tipo(msg) => {
                if let Some(selector) = &mut self.selector {
                    selector.update(msg);
                }
            }
        }
    }

    pub async fn submit(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<Notice, DisplayableError> {
        if self.step != CreateStep::Editing {
            return Err(DisplayableError::new("Already submitted"));
        }
        self.form.validate()?;
        if self.catalog.is_empty() {
            return Err(DisplayableError::new(
                "Tipos are not loaded yet, try again",
            ));
        }

        self.step = CreateStep::Submitting;
        match api.create_pokemon(&self.form).await {
            Ok(pokemon) => {
                info!("Created pokemon {} '{}'.", pokemon.id, pokemon.name);
                self.form = NewPokemon::default();
                self.selector =
                    Some(TipoSelector::new(self.catalog.clone(), vec![]));
                self.step = CreateStep::AwaitingTipos(pokemon.id);
                Ok(Notice::new(format!("{} created", pokemon.name)))
            }
            Err(e) => {
                error!("Failed to create pokemon: {e}");
                self.step = CreateStep::Editing;
                Err(DisplayableError::describe(
                    &e,
                    "Failed to create Pokémon",
                ))
            }
        }
    }

    /// Save the picked tipos on the freshly created Pokémon.
    pub async fn confirm_tipos(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<Notice, DisplayableError> {
        let CreateStep::AwaitingTipos(id) = self.step else {
            return Err(DisplayableError::new("No Pokémon to assign tipos to"));
        };
        let selector = self.selector.as_ref().ok_or_else(|| {
            DisplayableError::new("No Pokémon to assign tipos to")
        })?;
        let tipos = selector.submission()?;

        let patch = PokemonPatch::default().with_tipos(tipos);
        match api.update_pokemon(id, &patch).await {
            Ok(_) => {
                self.selector = None;
                self.step = CreateStep::Done;
                Ok(Notice::new("Tipos updated"))
            }
            Err(e) => {
                warn!("Failed to assign tipos to pokemon {id}: {e}");
                Err(DisplayableError::describe(&e, "Failed to update tipos"))
            }
        }
    }
}
