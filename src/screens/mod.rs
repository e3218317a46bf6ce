mod create_pokemon;
mod edit_pokemon;
mod pokemon_detail;
mod pokemon_list;

pub use create_pokemon::{CreatePokemon, CreatePokemonMessage, CreateStep};
pub use edit_pokemon::{EditPokemon, EditPokemonMessage, EditStep};
pub use pokemon_detail::{DetailStatus, PokemonDetail};
pub use pokemon_list::PokemonList;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}
