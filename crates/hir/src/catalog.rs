//! The item catalog: the shared index space of every model matrix.

use crate::error::{HirError, Result};
use data_loader::ItemId;
use std::collections::HashMap;

/// Finite, unique, ordered set of item ids.
///
/// Ids are stored in ascending order; an item's position in that order is
/// its row (and column) in every matrix of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    ids: Vec<ItemId>,
    positions: HashMap<ItemId, usize>,
}

impl ItemCatalog {
    /// Build a catalog, sorting and dropping duplicate ids.
    pub fn new(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut ids: Vec<ItemId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        Self { ids, positions }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.positions.contains_key(&item)
    }

    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        self.positions.get(&item).copied()
    }

    /// Like [`index_of`](Self::index_of), failing with `UnknownItem`.
    pub fn require_index(&self, item: ItemId) -> Result<usize> {
        self.index_of(item).ok_or(HirError::UnknownItem { item })
    }

    /// Positions of `items`, in the order given.
    pub fn require_indices(&self, items: &[ItemId]) -> Result<Vec<usize>> {
        items.iter().map(|&item| self.require_index(item)).collect()
    }
}
