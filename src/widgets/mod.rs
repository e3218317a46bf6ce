mod delete_gate;
mod tipo_selector;

pub use delete_gate::{DeleteGate, DeleteTarget};
pub use tipo_selector::{TipoSelector, TipoSelectorMessage};
