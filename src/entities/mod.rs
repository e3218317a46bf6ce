mod image;
mod pokemon;
mod tipo;

pub use image::{ImageUpload, ALLOWED_IMAGE_TYPES};
pub use pokemon::{NewPokemon, Pokemon, PokemonId, PokemonPatch};
pub use tipo::{Tipo, TipoId};
