use log::error;

use crate::api::CatalogApi;
use crate::entities::{Pokemon, PokemonId};
use crate::error::DisplayableError;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DetailStatus {
    #[default]
    Loading,
    Ready(Pokemon),
    Failed(String),
    /// The service answered 404.
    NotFound,
}

/// Read-only view of a single Pokémon.
#[derive(Debug, Default)]
pub struct PokemonDetail {
    status: DetailStatus,
}

impl PokemonDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    pub fn pokemon(&self) -> Option<&Pokemon> {
        match &self.status {
            DetailStatus::Ready(pokemon) => Some(pokemon),
            _ => None,
        }
    }

    pub async fn load(&mut self, api: &dyn CatalogApi, id: PokemonId) {
        self.status = DetailStatus::Loading;
        self.status = match api.get_pokemon(id).await {
            Ok(pokemon) => DetailStatus::Ready(pokemon),
            Err(e) if e.is_not_found() => DetailStatus::NotFound,
            Err(e) => {
                error!("Failed to load pokemon {id}: {e}");
                let message =
                    DisplayableError::describe(&e, "Failed to load Pokémon");
                DetailStatus::Failed(message.to_string())
            }
        };
    }
}

#[cfg(test)]
mod test {
    use reqwest::StatusCode;

    use super::*;
    use crate::test::{FakeCatalog, Failure, Op, FIRE, FLYING};

    #[tokio::test]
    async fn test_load() {
        let api = FakeCatalog::new();
        let charizard = api.seed(6, "Charizard", &[FIRE, FLYING]);
        let mut detail = PokemonDetail::new();
        detail.load(&api, PokemonId::new(6)).await;
        assert_eq!(detail.status(), &DetailStatus::Ready(charizard));
    }

    #[tokio::test]
    async fn test_missing_is_not_found_not_failed() {
        let api = FakeCatalog::new();
        let mut detail = PokemonDetail::new();
        detail.load(&api, PokemonId::new(7)).await;
        assert_eq!(detail.status(), &DetailStatus::NotFound);
        assert_eq!(detail.pokemon(), None);
    }

    #[tokio::test]
    async fn test_other_failures() {
        let api = FakeCatalog::new();
        api.seed(6, "Charizard", &[]);
        api.fail(
            Op::Get,
            Failure::Service(StatusCode::INTERNAL_SERVER_ERROR, ""),
        );
        let mut detail = PokemonDetail::new();
        detail.load(&api, PokemonId::new(6)).await;
        assert_eq!(
            detail.status(),
            &DetailStatus::Failed("Failed to load Pokémon".to_string())
        );
    }
}
