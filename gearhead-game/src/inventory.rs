//! Parts the player owns but has not installed.
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::part::Part;

/// Ordered, index-addressable part storage. Duplicate names are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Part>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an inventory from saved names; parts carry zero deltas.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: names.into_iter().map(Part::named).collect(),
        }
    }

    pub fn add(&mut self, part: Part) {
        self.items.push(part);
    }

    /// Remove and return the part at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] for a bad index.
    pub fn remove(&mut self, index: usize) -> Result<Part, GameError> {
        if index >= self.items.len() {
            return Err(GameError::out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    /// Put a part back at `index` (clamped to the end).
    pub(crate) fn restore(&mut self, index: usize, part: Part) {
        let index = index.min(self.items.len());
        self.items.insert(index, part);
    }

    /// Borrow the part at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] for a bad index.
    pub fn peek(&self, index: usize) -> Result<&Part, GameError> {
        self.items
            .get(index)
            .ok_or_else(|| GameError::out_of_range(index, self.items.len()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Part> {
        self.items.iter()
    }

    /// Names in order, as written by the save contract.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|p| p.name().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
