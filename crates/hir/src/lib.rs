//! # HIR Crate
//!
//! Model building and scoring for a hybrid item ranking recommender. A
//! user's candidates are scored by blending three signals:
//!
//! - the user's own normalized ratings
//! - **direct association**: how often two items were rated by the same users
//! - **proximity**: how much two items overlap in genre space
//!
//! ## Data Flow
//! ```text
//! catalog + item rating vectors ─▶ DirectAssociationBuilder ─┐
//! catalog + genre vectors ─▶ GenreRowStochasticFactor ───────┼─▶ HirModel
//! catalog + genre vectors ─▶ GenreColumnStochasticFactor ────┘      │
//!                                      user history + candidates ─▶ Scorer ─▶ scores
//! ```
//!
//! The model is built once from a full snapshot and never changes; it is
//! shared behind an `Arc` by every scoring call. Nothing in this crate does
//! I/O. Data comes in through the traits in [`source`].
//!
//! ## Example Usage
//! ```ignore
//! use hir::{build_model, ItemCatalog, ItemScorer, Scorer, ScorerConfig};
//! use hir::source::HistorySource;
//! use std::sync::Arc;
//!
//! let model = build_model(ItemCatalog::new(index.item_ids()), &index, &index)?;
//! let scorer = Scorer::new(Arc::new(model), ScorerConfig::default())?;
//! let scores = scorer.score(&index.user_history(1), &candidates)?;
//! ```

pub mod association;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matrix;
pub mod model;
pub mod proximity;
pub mod scorer;
pub mod source;
pub mod vector;

pub use association::DirectAssociationBuilder;
pub use builder::{build_model, ModelBuilder};
pub use catalog::ItemCatalog;
pub use config::ScorerConfig;
pub use error::{HirError, Result};
pub use matrix::DenseMatrix;
pub use model::HirModel;
pub use proximity::{GenreColumnStochasticFactor, GenreRowStochasticFactor};
pub use scorer::{score, ItemScorer, ScoredItem, Scorer};
pub use source::{GenreSource, HistorySource, ItemVectorSource};
pub use vector::SparseVector;
