use crate::entities::PokemonId;

/// The record a delete confirmation is about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeleteTarget {
    pub id: PokemonId,
    pub name: String,
}

/// Yes/no confirmation in front of a delete.
///
/// Only an `Open` gate can be passed, and passing it moves it to `Deleting`,
/// so repeated confirmations yield a single delete.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DeleteGate {
    #[default]
    Closed,
    Open(DeleteTarget),
    Deleting(DeleteTarget),
}

impl DeleteGate {
    pub fn open(&mut self, id: PokemonId, name: &str) {
        if matches!(self, Self::Deleting(_)) {
            return;
        }
        *self = Self::Open(DeleteTarget {
            id,
            name: name.to_string(),
        });
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Pass the gate. Returns the target only on the first confirmation.
    pub fn begin(&mut self) -> Option<DeleteTarget> {
        match std::mem::take(self) {
            Self::Open(target) => {
                *self = Self::Deleting(target.clone());
                Some(target)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, Self::Deleting(_))
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        match self {
            Self::Closed => None,
            Self::Open(target) | Self::Deleting(target) => Some(target),
        }
    }
}
