use log::{error, info};

use super::LoadStatus;
use crate::api::CatalogApi;
use crate::entities::{Pokemon, PokemonId};
use crate::error::{DisplayableError, Notice};
use crate::widgets::DeleteGate;

/// All Pokémon, plus the delete confirmation in front of each of them.
#[derive(Debug, Default)]
pub struct PokemonList {
    records: Vec<Pokemon>,
    status: LoadStatus,
    gate: DeleteGate,
}

impl PokemonList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Pokemon] {
        &self.records
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn gate(&self) -> &DeleteGate {
        &self.gate
    }

    pub async fn load(&mut self, api: &dyn CatalogApi) {
        self.status = LoadStatus::Loading;
        match api.list_pokemon().await {
            Ok(records) => {
                info!("Loaded {} pokemon.", records.len());
                self.records = records;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                error!("Failed to load pokemon: {e}");
                let message =
                    DisplayableError::describe(&e, "Failed to load Pokémon");
                self.status = LoadStatus::Failed(message.to_string());
            }
        }
    }

    pub fn request_delete(&mut self, id: PokemonId, name: &str) {
        self.gate.open(id, name);
    }

    pub fn cancel_delete(&mut self) {
        if !self.gate.is_deleting() {
            self.gate.close();
        }
    }

    /// Delete the record the gate was opened for.
    ///
    /// The gate is closed afterwards whatever the outcome.
    pub async fn confirm_delete(
        &mut self,
        api: &dyn CatalogApi,
    ) -> Result<Notice, DisplayableError> {
        let Some(target) = self.gate.begin() else {
            return Err(DisplayableError::new("Nothing to delete"));
        };
        let result = api.delete_pokemon(target.id).await;
        self.gate.close();
        match result {
            Ok(()) => {
                self.records.retain(|p| p.id != target.id);
                Ok(Notice::new(format!("{} deleted", target.name)))
            }
            Err(e) => {
                error!("Failed to delete pokemon {}: {e}", target.id);
                Err(DisplayableError::new(format!(
                    "Failed to delete {}",
                    target.name
                )))
            }
        }
    }
}
