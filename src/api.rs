use async_trait::async_trait;

use crate::entities::{NewPokemon, Pokemon, PokemonId, PokemonPatch, Tipo};
use crate::error::ClientResult;
use crate::utils::Client;

/// Operations of the remote catalog service that the screens rely on.
///
/// [`Client`] talks HTTP; tests substitute an in-memory catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_pokemon(&self) -> ClientResult<Vec<Pokemon>>;

    /// Fails with [`NotFound`](crate::error::ClientError::NotFound) for an
    /// unknown id.
    async fn get_pokemon(&self, id: PokemonId) -> ClientResult<Pokemon>;

    async fn create_pokemon(&self, new: &NewPokemon) -> ClientResult<Pokemon>;

    async fn update_pokemon(
        &self,
        id: PokemonId,
        patch: &PokemonPatch,
    ) -> ClientResult<Pokemon>;

    async fn delete_pokemon(&self, id: PokemonId) -> ClientResult<()>;

    async fn list_tipos(&self) -> ClientResult<Vec<Tipo>>;
}

#[async_trait]
impl CatalogApi for Client {
    async fn list_pokemon(&self) -> ClientResult<Vec<Pokemon>> {
        Pokemon::load_all(self).await
    }

    async fn get_pokemon(&self, id: PokemonId) -> ClientResult<Pokemon> {
        Pokemon::load(self, id).await
    }

    async fn create_pokemon(&self, new: &NewPokemon) -> ClientResult<Pokemon> {
        new.create(self).await
    }

    async fn update_pokemon(
        &self,
        id: PokemonId,
        patch: &PokemonPatch,
    ) -> ClientResult<Pokemon> {
        patch.apply(self, id).await
    }

    async fn delete_pokemon(&self, id: PokemonId) -> ClientResult<()> {
        Pokemon::delete(self, id).await
    }

    async fn list_tipos(&self) -> ClientResult<Vec<Tipo>> {
        Tipo::load_all(self).await
    }
}
