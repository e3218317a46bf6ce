use log::{error, info, warn};

use crate::api::CatalogApi;
use crate::entities::{ImageUpload, PokemonId, PokemonPatch, Tipo};
use crate::error::{DisplayableError, Notice, ValidationError};
use crate::widgets::{TipoSelector, TipoSelectorMessage};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum EditStep {
    #[default]
    Loading,
    Ready,
    Submitting,
    AssigningTipos,
    /// Tipos saved, the caller should navigate away.
    Done,
    NotFound,
    Failed(String),
}

#[derive(Clone, Debug)]
pub enum EditPokemonMessage {
    NameEdited(String),
    ImageSelected(Option<ImageUpload>),
    Tipo(TipoSelectorMessage),
}

/// Rename a Pokémon or replace its image, then revise its tipos.
#[derive(Debug)]
pub struct EditPokemon {
    id: PokemonId,
    name: String,
    image_url: String,
    new_image: Option<ImageUpload>,
    catalog: Vec<Tipo>,
    step: EditStep,
    /// Set once a save succeeded; the tipo step is reachable from then on.
    saved: bool,
    selector: Option<TipoSelector>,
}

impl EditPokemon {
    pub fn new(id: PokemonId) -> Self {
        Self {
            id,
            name: String::new(),
            image_url: String::new(),
            new_image: None,
            catalog: vec![],
            step: EditStep::Loading,
            saved: false,
            selector: None,
        }
    }

    pub fn id(&self) -> PokemonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn new_image(&self) -> Option<&ImageUpload> {
        self.new_image.as_ref()
    }

    pub fn step(&self) -> &EditStep {
        &self.step
    }

    pub fn selector(&self) -> Option<&TipoSelector> {
        self.selector.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.step == EditStep::Done
    }

    /// Fetch the Pokémon and the tipo catalog side by side.
    pub async fn load(&mut self, api: &dyn CatalogApi) {
        self.step = EditStep::Loading;
        let loaded =
            futures::try_join!(api.get_pokemon(self.id), api.list_tipos());
        match loaded {
            Ok((pokemon, catalog)) => {
                self.name = pokemon.name;
                self.image_url = pokemon.image_url;
                self.catalog = catalog;
                self.step = EditStep::Ready;
            }
            Err(e) if e.is_not_found() => self.step = EditStep::NotFound,
            Err(e) => {
                error!("Failed to load pokemon {} for editing: {e}", self.id);
                let message = DisplayableError::describe(
                    &e,
                    "Failed to load the Pokémon's data",
                );
                self.step = EditStep::Failed(message.to_string());
            }
        }
    }

    pub fn update(&mut self, message: EditPokemonMessage) {
        match message {
            EditPokemonMessage::NameEdited(name) => self.name = name,
            EditPokemonMessage::ImageSelected(image) => self.new_image = image,
            EditPokemonMessage::Tipo(msg) => {
                if let Some(selector) = &mut self.selector {
                    selector.update(msg);
                }
            }
        }
    }

    /// Save name and, if one was picked, the replacement image.
    ///
    /// On success the tipo step becomes available via [`Self::open_tipos`].
    pub async fn submit(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<Notice, DisplayableError> {
        if self.step != EditStep::Ready {
            return Err(DisplayableError::new(
                "The Pokémon is not ready to be saved",
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        self.step = EditStep::Submitting;
        let patch = PokemonPatch::default()
            .with_name(&self.name)
            .with_image(self.new_image.clone());
        match api.update_pokemon(self.id, &patch).await {
            Ok(pokemon) => {
                info!("Updated pokemon {} '{}'.", pokemon.id, pokemon.name);
                self.name = pokemon.name;
                self.image_url = pokemon.image_url;
                self.new_image = None;
                self.saved = true;
                self.step = EditStep::AssigningTipos;
                Ok(Notice::new(format!("{} updated", self.name)))
            }
            Err(e) => {
                error!("Failed to update pokemon {}: {e}", self.id);
                self.step = EditStep::Ready;
                Err(DisplayableError::describe(&e, "Failed to update Pokémon"))
            }
        }
    }

    /// Show the tipo step. The first opening re-reads the Pokémon to
    /// pre-select its current tipos; later openings keep the selection.
    pub async fn open_tipos(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<(), DisplayableError> {
        match self.step {
            EditStep::AssigningTipos => {}
            EditStep::Ready if self.saved => {
                self.step = EditStep::AssigningTipos;
            }
            _ => {
                return Err(DisplayableError::new(
                    "Save the Pokémon before editing its tipos",
                ))
            }
        }
        if self.selector.is_some() {
            return Ok(());
        }

        match api.get_pokemon(self.id).await {
            Ok(pokemon) => {
                self.selector = Some(TipoSelector::new(
                    self.catalog.clone(),
                    pokemon.tipo_ids(),
                ));
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Failed to load current tipos of pokemon {}: {e}",
                    self.id
                );
                self.selector =
                    Some(TipoSelector::new(self.catalog.clone(), vec![]));
                Err(DisplayableError::describe(
                    &e,
                    "Failed to load the Pokémon's tipos",
                ))
            }
        }
    }

    pub fn close_tipos(&mut self) {
        if self.step == EditStep::AssigningTipos {
            self.step = EditStep::Ready;
        }
    }

    pub async fn confirm_tipos(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<Notice, DisplayableError> {
        let selector = match (&self.step, &self.selector) {
            (EditStep::AssigningTipos, Some(selector)) => selector,
            _ => {
                return Err(DisplayableError::new("The tipo step is not open"))
            }
        };
        let tipos = selector.submission()?;

        let patch = PokemonPatch::default().with_tipos(tipos);
        match api.update_pokemon(self.id, &patch).await {
            Ok(_) => {
                self.step = EditStep::Done;
                Ok(Notice::new("Tipos updated"))
            }
            Err(e) => {
                warn!("Failed to update tipos of pokemon {}: {e}", self.id);
                Err(DisplayableError::describe(&e, "Failed to update tipos"))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use reqwest::StatusCode;

    use super::*;
    use crate::test::{png, FakeCatalog, Failure, Op, FIRE, FLYING, WATER};

    async fn loaded(api: &FakeCatalog) -> EditPokemon {
        api.seed(6, "Charizard", &[FIRE, FLYING]);
        let mut edit = EditPokemon::new(PokemonId::new(6));
        edit.load(api).await;
        edit
    }

    #[tokio::test]
    async fn test_load_fetches_record_and_catalog() {
        let api = FakeCatalog::new();
        let edit = loaded(&api).await;
        assert_eq!(edit.step(), &EditStep::Ready);
        assert_eq!(edit.name(), "Charizard");
        assert_eq!(edit.image_url(), "https://img.test/Charizard.png");
        assert_eq!(api.calls(Op::Get).len(), 1);
        assert_eq!(api.calls(Op::ListTipos).len(), 1);
    }

    #[tokio::test]
    async fn test_load_not_found() {
        let api = FakeCatalog::new();
        let mut edit = EditPokemon::new(PokemonId::new(7));
        edit.load(&api).await;
        assert_eq!(edit.step(), &EditStep::NotFound);
    }

    #[tokio::test]
    async fn test_load_catalog_failure() {
        let api = FakeCatalog::new();
        api.fail(
            Op::ListTipos,
            Failure::Service(StatusCode::SERVICE_UNAVAILABLE, ""),
        );
        let edit = loaded(&api).await;
        assert!(matches!(edit.step(), EditStep::Failed(_)));
    }

    #[tokio::test]
    async fn test_replace_tipos() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.update(EditPokemonMessage::NameEdited("Charizard X".to_string()));
        edit.submit(&api).await.expect("saved");
        assert_eq!(edit.step(), &EditStep::AssigningTipos);
        assert!(edit.selector().is_none());

        edit.open_tipos(&api).await.expect("opened");
        let selector = edit.selector().expect("selector");
        assert_eq!(selector.get_value(), vec![FIRE, FLYING]);
        // Initial load plus the refetch on opening.
        assert_eq!(api.calls(Op::Get).len(), 2);

        edit.update(EditPokemonMessage::Tipo(TipoSelectorMessage::Clear));
        edit.update(EditPokemonMessage::Tipo(TipoSelectorMessage::Select(
            WATER,
        )));
        edit.confirm_tipos(&api).await.expect("tipos saved");
        assert!(edit.is_done());

        let stored = api.stored(PokemonId::new(6)).expect("stored");
        assert_eq!(stored.name, "Charizard X");
        assert_eq!(stored.tipo_ids(), vec![WATER]);
    }

    #[tokio::test]
    async fn test_reopen_keeps_selection() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.submit(&api).await.expect("saved");
        edit.open_tipos(&api).await.expect("opened");
        edit.update(EditPokemonMessage::Tipo(TipoSelectorMessage::Toggle(
            FIRE,
        )));
        edit.close_tipos();
        assert_eq!(edit.step(), &EditStep::Ready);

        edit.open_tipos(&api).await.expect("reopened");
        assert_eq!(edit.step(), &EditStep::AssigningTipos);
        let selector = edit.selector().expect("selector");
        assert_eq!(selector.get_value(), vec![FLYING]);
        assert_eq!(api.calls(Op::Get).len(), 2);
    }

    #[tokio::test]
    async fn test_close_before_open_keeps_tipo_step_reachable() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.submit(&api).await.expect("saved");
        edit.close_tipos();
        assert_eq!(edit.step(), &EditStep::Ready);

        edit.open_tipos(&api).await.expect("opened without saving again");
        assert_eq!(edit.step(), &EditStep::AssigningTipos);
        let selector = edit.selector().expect("selector");
        assert_eq!(selector.get_value(), vec![FIRE, FLYING]);
        assert_eq!(api.calls(Op::Update).len(), 1);
    }

    #[tokio::test]
    async fn test_any_replacement_image_is_sent() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.update(EditPokemonMessage::ImageSelected(Some(
            ImageUpload::new("mega.bmp", "image/bmp", vec![b'B', b'M']),
        )));
        edit.submit(&api).await.expect("saved");
        assert_eq!(api.calls(Op::Update).len(), 1);
        let patch = api.last_patch().expect("patch");
        assert_eq!(patch.image.expect("image").mime_type, "image/bmp");
        assert_eq!(edit.step(), &EditStep::AssigningTipos);
    }

    #[tokio::test]
    async fn test_image_is_optional_and_sent_when_given() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.submit(&api).await.expect("saved without image");
        assert!(api.last_patch().expect("patch").image.is_none());

        let mut edit = EditPokemon::new(PokemonId::new(6));
        edit.load(&api).await;
        edit.update(EditPokemonMessage::ImageSelected(Some(png("mega"))));
        edit.submit(&api).await.expect("saved with image");
        assert!(api.last_patch().expect("patch").image.is_some());
        assert_eq!(edit.image_url(), "https://img.test/mega.png");
        assert!(edit.new_image().is_none());
    }

    #[tokio::test]
    async fn test_empty_name_rejected_locally() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.update(EditPokemonMessage::NameEdited(String::new()));
        let err = edit.submit(&api).await.expect_err("rejected");
        assert_eq!(err.message(), "Name is required");
        assert_eq!(edit.step(), &EditStep::Ready);
        assert!(api.calls(Op::Update).is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_stays_ready() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        api.fail(
            Op::Update,
            Failure::Service(StatusCode::INTERNAL_SERVER_ERROR, ""),
        );
        let err = edit.submit(&api).await.expect_err("failed");
        assert_eq!(err.message(), "Failed to update Pokémon");
        assert_eq!(edit.step(), &EditStep::Ready);
        assert!(edit.open_tipos(&api).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_selection_leaves_tipos_untouched() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.submit(&api).await.expect("saved");
        edit.open_tipos(&api).await.expect("opened");
        edit.update(EditPokemonMessage::Tipo(TipoSelectorMessage::Clear));
        let updates = api.calls(Op::Update).len();

        let err = edit.confirm_tipos(&api).await.expect_err("rejected");
        assert_eq!(err.message(), "Select at least one tipo");
        assert_eq!(api.calls(Op::Update).len(), updates);
        assert_eq!(
            api.stored(PokemonId::new(6)).expect("stored").tipo_ids(),
            vec![FIRE, FLYING]
        );
    }

    #[tokio::test]
    async fn test_refetch_failure_opens_empty() {
        let api = FakeCatalog::new();
        let mut edit = loaded(&api).await;
        edit.submit(&api).await.expect("saved");
        api.fail(
            Op::Get,
            Failure::Service(StatusCode::INTERNAL_SERVER_ERROR, ""),
        );
        assert!(edit.open_tipos(&api).await.is_err());
        assert_eq!(edit.step(), &EditStep::AssigningTipos);
        assert!(edit.selector().expect("selector").get_value().is_empty());
    }
}
