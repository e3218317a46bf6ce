use crate::entities::{Tipo, TipoId};
use crate::error::ValidationError;

#[derive(Clone, Debug)]
pub enum TipoSelectorMessage {
    Toggle(TipoId),
    Select(TipoId),
    Deselect(TipoId),
    Clear,
}

/// Checkbox list over the tipo catalog.
#[derive(Clone, Debug, Default)]
pub struct TipoSelector {
    options: Vec<Tipo>,
    selected: Vec<TipoId>,
}

impl TipoSelector {
    /// Ids in `selected` that are not in `options` are dropped.
    pub fn new(options: Vec<Tipo>, selected: Vec<TipoId>) -> Self {
        let mut this = Self {
            options,
            ..Self::default()
        };
        for id in selected {
            this.update(TipoSelectorMessage::Select(id));
        }
        this
    }

    pub fn update(&mut self, message: TipoSelectorMessage) {
        use TipoSelectorMessage::*;
        match message {
            Toggle(id) => {
                if self.is_selected(id) {
                    self.update(Deselect(id));
                } else {
                    self.update(Select(id));
                }
            }
            Select(id) => {
                if !self.is_selected(id)
                    && self.options.iter().any(|t| t.id == id)
                {
                    self.selected.push(id);
                }
            }
            Deselect(id) => self.selected.retain(|&t| t != id),
            Clear => self.selected.clear(),
        }
    }

    pub fn options(&self) -> &[Tipo] {
        &self.options
    }

    pub fn is_selected(&self, id: TipoId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in the order they were picked.
    pub fn get_value(&self) -> Vec<TipoId> {
        self.selected.clone()
    }

    /// The selection, rejecting an empty one.
    pub fn submission(&self) -> Result<Vec<TipoId>, ValidationError> {
        if self.selected.is_empty() {
            Err(ValidationError::EmptyTipoSelection)
        } else {
            Ok(self.get_value())
        }
    }
}
