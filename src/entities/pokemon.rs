use log::{debug, info};
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

use super::{ImageUpload, Tipo, TipoId};
use crate::error::{ClientResult, ValidationError};
use crate::utils::{null_as_default, Client};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct PokemonId(u64);

impl PokemonId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for PokemonId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for PokemonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A catalog entry as the service returns it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(
        rename = "imagen_url",
        default,
        deserialize_with = "null_as_default"
    )]
    pub image_url: String,
    /// Storage key of the image, managed by the service.
    #[serde(
        rename = "cloudinary_public_id",
        default,
        deserialize_with = "null_as_default"
    )]
    pub image_public_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tipos: Vec<Tipo>,
}

impl Pokemon {
    pub fn tipo_ids(&self) -> Vec<TipoId> {
        self.tipos.iter().map(|t| t.id).collect()
    }

    pub async fn load_all(client: &Client) -> ClientResult<Vec<Self>> {
        info!("Fetching all pokemon...");
        let rsp = client.get(client.url("/pokemon")).send().await?;
        Ok(Client::check_status(rsp).await?.json().await?)
    }

    pub async fn load(client: &Client, id: PokemonId) -> ClientResult<Self> {
        info!("Fetching pokemon {id}...");
        let rsp = client
            .get(client.url(&format!("/pokemon/{id}")))
            .send()
            .await?;
        Ok(Client::check_status(rsp).await?.json().await?)
    }

    pub async fn delete(client: &Client, id: PokemonId) -> ClientResult<()> {
        info!("Deleting pokemon {id}...");
        let rsp = client
            .delete(client.url(&format!("/pokemon/{id}")))
            .send()
            .await?;
        Client::check_status(rsp).await?;
        Ok(())
    }
}

/// Payload of the create form: a name and an image, both required.
#[derive(Clone, Debug, Default)]
pub struct NewPokemon {
    pub name: String,
    pub image: Option<ImageUpload>,
}

impl NewPokemon {
    pub fn new(name: &str, image: Option<ImageUpload>) -> Self {
        Self {
            name: name.to_string(),
            image,
        }
    }

    /// Returns the image on success, so callers need not unwrap it again.
    pub fn validate(&self) -> Result<&ImageUpload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let image = self.image.as_ref().ok_or(ValidationError::MissingImage)?;
        image.validate()?;
        Ok(image)
    }

    pub async fn create(&self, client: &Client) -> ClientResult<Pokemon> {
        let image = self.validate()?;
        info!("Creating pokemon '{}'...", self.name);
        let form = Form::new()
            .text("nombre", self.name.clone())
            .part("imagen", image.to_part()?);
        let rsp = client
            .post(client.url("/pokemon"))
            .multipart(form)
            .send()
            .await?;
        Ok(Client::check_status(rsp).await?.json().await?)
    }
}

/// Partial update. Absent fields are left untouched by the service;
/// `tipos`, when present, replaces the whole set.
#[derive(Clone, Debug, Default)]
pub struct PokemonPatch {
    pub name: Option<String>,
    pub image: Option<ImageUpload>,
    pub tipos: Option<Vec<TipoId>>,
}

#[derive(Serialize)]
struct JsonPatch<'a> {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tipos: Option<&'a [TipoId]>,
}

impl PokemonPatch {
    pub fn with_name(self, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..self
        }
    }

    pub fn with_image(self, image: Option<ImageUpload>) -> Self {
        Self { image, ..self }
    }

    pub fn with_tipos(self, tipos: Vec<TipoId>) -> Self {
        Self {
            tipos: Some(tipos),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::EmptyName);
        }
        if self.tipos.as_ref().is_some_and(Vec::is_empty) {
            return Err(ValidationError::EmptyTipoSelection);
        }
        Ok(())
    }

    pub async fn apply(
        &self,
        client: &Client,
        id: PokemonId,
    ) -> ClientResult<Pokemon> {
        self.validate()?;
        info!("Updating pokemon {id}...");
        let request = client.patch(client.url(&format!("/pokemon/{id}")));
        let request = match &self.image {
            Some(image) => {
                debug!("Sending patch as multipart form.");
                request.multipart(self.to_form(image)?)
            }
            None => {
                debug!("Sending patch as JSON.");
                request.json(&JsonPatch {
                    name: self.name.as_deref(),
                    tipos: self.tipos.as_deref(),
                })
            }
        };
        let rsp = request.send().await?;
        Ok(Client::check_status(rsp).await?.json().await?)
    }

    fn to_form(&self, image: &ImageUpload) -> ClientResult<Form> {
        let mut form = Form::new();
        if let Some(name) = &self.name {
            form = form.text("nombre", name.clone());
        }
        form = form.part("imagen", image.to_part()?);
        for tipo in self.tipos.iter().flatten() {
            form = form.text("tipos", tipo.to_string());
        }
        Ok(form)
    }
}
