use itertools::Itertools;

use crate::entities::Tipo;

mod client;
mod serde;

pub use self::client::Client;
pub use self::serde::null_as_default;

/// Comma-separated tipo names, e.g. `fire, flying`.
pub fn tipo_names(tipos: &[Tipo]) -> String {
    tipos.iter().map(|t| t.name.as_str()).join(", ")
}
