//! DataIndex building and validation.
//!
//! Loads both data files, fills the primary indices and checks the result
//! before the model builder sees it.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

pub const RATINGS_FILE: &str = "ratings.csv";
pub const GENRES_FILE: &str = "genres.csv";

impl DataIndex {
    /// Load a dataset directory containing `ratings.csv` and `genres.csv`.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Build the user and item indices
    /// 3. Validate data integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", data_dir);

        let ratings_path = data_dir.join(RATINGS_FILE);
        let genres_path = data_dir.join(GENRES_FILE);

        let (ratings, items) = rayon::join(
            || parser::parse_ratings(&ratings_path),
            || parser::parse_genres(&genres_path),
        );
        let ratings = ratings?;
        let items = items?;

        info!("Parsed {} ratings and {} catalog entries", ratings.len(), items.len());

        let mut index = DataIndex::new();
        for item in items {
            index.insert_item(item);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }

        index.validate()?;

        let (users, items, ratings) = index.counts();
        info!(
            users,
            items,
            ratings,
            genre_dimensionality = index.genre_dimensionality(),
            "DataIndex built and validated"
        );
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - every rating value is finite
    /// - every genre vector has the dataset's dimensionality and finite weights
    pub fn validate(&self) -> Result<()> {
        for ratings in self.user_ratings.values() {
            for rating in ratings {
                if !rating.rating.is_finite() {
                    return Err(DataLoadError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.rating.to_string(),
                    });
                }
            }
        }

        let expected = self.genre_dimensionality();
        for item in self.items.values() {
            let Some(genres) = &item.genres else { continue };
            if genres.len() != expected {
                return Err(DataLoadError::InconsistentGenreLength {
                    item: item.id,
                    expected,
                    found: genres.len(),
                });
            }
            if let Some(bad) = genres.iter().find(|g| !g.is_finite()) {
                return Err(DataLoadError::InvalidValue {
                    field: "genre weight".to_string(),
                    value: bad.to_string(),
                });
            }
        }
        Ok(())
    }
}
