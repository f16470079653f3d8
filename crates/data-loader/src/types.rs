//! Core domain types for rating and genre data.
//!
//! This module defines the fundamental data structures shared by the
//! model-building core and the application crates:
//! - Type aliases for domain clarity (UserId, ItemId)
//! - Plain structs for ratings and catalog entries
//! - DataIndex, the in-memory store the model is built from

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with item IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for an item (a movie in the bundled datasets)
pub type ItemId = u32;

// =============================================================================
// Rating Type
// =============================================================================

/// A single rating from a user for an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f64,
    /// Unix timestamp when the rating was made
    pub timestamp: i64,
}

// =============================================================================
// Item Type
// =============================================================================

/// A catalog entry loaded from the genre file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Fixed-length genre weights, `None` when the item carries no genre data.
    ///
    /// Every vector in one dataset has the same length.
    pub genres: Option<Vec<f64>>,
}

// =============================================================================
// DataIndex - The In-Memory Store
// =============================================================================

/// Holds every rating and catalog entry together with the lookups the
/// model builder needs.
///
/// Ratings are indexed twice: by user (rating histories for scoring) and by
/// item (the per-item rating vectors that co-rating counts are computed from).
#[derive(Debug, Default)]
pub struct DataIndex {
    pub(crate) items: HashMap<ItemId, Item>,

    /// All ratings made by each user
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
    /// All ratings received by each item
    pub(crate) item_ratings: HashMap<ItemId, Vec<Rating>>,

    /// Length of the first genre vector inserted
    pub(crate) genre_dimensionality: Option<usize>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a catalog entry by ID
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Title of an item, if the genre file named it
    pub fn item_title(&self, id: ItemId) -> Option<&str> {
        self.items.get(&id).map(|item| item.title.as_str())
    }

    /// Genre vector of an item, if it has one
    pub fn item_genres(&self, id: ItemId) -> Option<&[f64]> {
        self.items.get(&id)?.genres.as_deref()
    }

    /// Number of genre dimensions in this dataset (0 when no item has genres)
    pub fn genre_dimensionality(&self) -> usize {
        self.genre_dimensionality.unwrap_or(0)
    }

    /// Get all ratings made by a user
    ///
    /// Returns an empty slice if the user has no ratings
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all ratings for an item
    pub fn get_item_ratings(&self, item_id: ItemId) -> &[Rating] {
        self.item_ratings
            .get(&item_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every known item: rated items plus items listed in the genre file,
    /// in ascending order.
    pub fn item_ids(&self) -> Vec<ItemId> {
        let ids: BTreeSet<ItemId> = self
            .items
            .keys()
            .chain(self.item_ratings.keys())
            .copied()
            .collect();
        ids.into_iter().collect()
    }

    /// Every user with at least one rating, in ascending order.
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.user_ratings.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Insert a catalog entry
    pub fn insert_item(&mut self, item: Item) {
        if self.genre_dimensionality.is_none() {
            self.genre_dimensionality = item.genres.as_ref().map(|g| g.len());
        }
        self.items.insert(item.id, item);
    }

    /// Insert a rating and update both indices.
    ///
    /// Re-rating an item replaces the user's earlier rating in place.
    pub fn insert_rating(&mut self, rating: Rating) {
        let by_user = self.user_ratings.entry(rating.user_id).or_default();
        match by_user.iter_mut().find(|r| r.item_id == rating.item_id) {
            Some(existing) => *existing = rating,
            None => by_user.push(rating),
        }

        let by_item = self.item_ratings.entry(rating.item_id).or_default();
        match by_item.iter_mut().find(|r| r.user_id == rating.user_id) {
            Some(existing) => *existing = rating,
            None => by_item.push(rating),
        }
    }

    /// (users, items, ratings) counts for logging and validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (self.user_ratings.len(), self.item_ids().len(), total_ratings)
    }
}
