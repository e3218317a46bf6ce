use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::utils::Client;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct TipoId(u64);

impl TipoId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for TipoId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TipoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A category label ("tipo") assignable to any number of Pokémon.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tipo {
    pub id: TipoId,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Tipo {
    pub fn new(id: TipoId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }

    /// The full catalog of assignable tipos. Small and unpaginated.
    pub async fn load_all(client: &Client) -> ClientResult<Vec<Self>> {
        info!("Fetching tipo catalog...");
        let rsp = client.get(client.url("/pokemon/tipos")).send().await?;
        Ok(Client::check_status(rsp).await?.json().await?)
    }
}

impl std::fmt::Display for Tipo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
