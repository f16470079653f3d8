//! # Data Loader Crate
//!
//! This crate loads rating and genre data into an in-memory index that the
//! `hir` model builder reads from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Item, DataIndex)
//! - **parser**: Parse `ratings.csv` and `genres.csv` into Rust structs
//! - **index**: Load, index and validate a dataset directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//! let history = index.get_user_ratings(1);
//! println!("User 1 rated {} items", history.len());
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{DataLoadError, Result};
pub use index::{GENRES_FILE, RATINGS_FILE};
pub use types::{DataIndex, Item, ItemId, Rating, UserId};
