//! Error types for model building and scoring.
//!
//! Every variant is a programming or configuration error detected at the
//! boundary of the core. None of them is retriable: the core does no I/O.
//! Zero-sum rows are not errors; they are left as zero.

use data_loader::ItemId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HirError {
    /// A single-use builder was asked for its output a second time
    #[error("Model data has already been built")]
    AlreadyBuilt,

    /// A query referenced an item outside the model's catalog
    #[error("Item {item} is not in the model catalog")]
    UnknownItem { item: ItemId },

    /// A genre vector does not match the catalog's genre dimensionality
    #[error("Genre vector for item {item} has {found} entries, expected {expected}")]
    InconsistentGenreDimensionality {
        item: ItemId,
        expected: usize,
        found: usize,
    },

    /// Blend weights outside [0, 1] or summing above 1
    #[error("Invalid blend weights: direct association {direct_association}, proximity {proximity}")]
    InvalidWeights {
        direct_association: f64,
        proximity: f64,
    },

    #[error("Cannot build a model from an empty catalog")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, HirError>;
