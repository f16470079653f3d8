//! One-shot assembly of an [`HirModel`] from a catalog and its data sources.

use crate::association::DirectAssociationBuilder;
use crate::catalog::ItemCatalog;
use crate::error::{HirError, Result};
use crate::model::HirModel;
use crate::proximity::{GenreColumnStochasticFactor, GenreRowStochasticFactor};
use crate::source::{GenreSource, ItemVectorSource};
use crate::vector::SparseVector;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Builds the direct-association matrix and both genre factors over one
/// catalog.
///
/// The builder is single use: the catalog moves into the model on the first
/// `build`, and a second call fails with [`HirError::AlreadyBuilt`], whether
/// or not the first call succeeded. A failed build must be restarted with a
/// fresh builder.
pub struct ModelBuilder<'a, R, G> {
    catalog: Option<ItemCatalog>,
    ratings: &'a R,
    genres: &'a G,
}

impl<'a, R, G> ModelBuilder<'a, R, G>
where
    R: ItemVectorSource,
    G: GenreSource,
{
    pub fn new(catalog: ItemCatalog, ratings: &'a R, genres: &'a G) -> Self {
        Self {
            catalog: Some(catalog),
            ratings,
            genres,
        }
    }

    #[instrument(skip_all)]
    pub fn build(&mut self) -> Result<HirModel> {
        let catalog = self.catalog.take().ok_or(HirError::AlreadyBuilt)?;
        if catalog.is_empty() {
            return Err(HirError::EmptyCatalog);
        }

        let start = Instant::now();
        info!(
            items = catalog.len(),
            genres = self.genres.genre_dimensionality(),
            "Building HIR model"
        );

        // Validate genre data first
        let row_factor = GenreRowStochasticFactor::new(&catalog, self.genres)?;
        let column_factor = GenreColumnStochasticFactor::new(&catalog, self.genres)?;

        let direct_association = {
            let ids = catalog.ids();
            let vectors: Vec<SparseVector> = ids
                .iter()
                .map(|&item| self.ratings.item_vector(item))
                .collect();

            // Upper triangle only: row i holds counts against items i+1..N
            let upper: Vec<Vec<usize>> = vectors
                .par_iter()
                .enumerate()
                .map(|(i, first)| {
                    vectors[i + 1..]
                        .iter()
                        .map(|second| first.intersect_count(second))
                        .collect()
                })
                .collect();
            debug!(elapsed = ?start.elapsed(), "Co-rating counts computed");

            let mut accumulator = DirectAssociationBuilder::new(&catalog);
            for (i, row) in upper.iter().enumerate() {
                accumulator.record_count(ids[i], ids[i], 0)?;
                for (offset, &coratings) in row.iter().enumerate() {
                    accumulator.record_count(ids[i], ids[i + 1 + offset], coratings)?;
                }
            }
            accumulator.build()
        };
        debug!(elapsed = ?start.elapsed(), "Direct association matrix built");

        let model = HirModel::new(
            catalog,
            direct_association,
            row_factor.row_stochastic(),
            column_factor.column_stochastic(),
        );
        info!(elapsed = ?start.elapsed(), "HIR model built");
        Ok(model)
    }
}

/// Build a model in one call.
///
/// Fails on an empty catalog or on genre vectors whose length differs from
/// the source's dimensionality.
pub fn build_model<R, G>(catalog: ItemCatalog, ratings: &R, genres: &G) -> Result<HirModel>
where
    R: ItemVectorSource,
    G: GenreSource,
{
    ModelBuilder::new(catalog, ratings, genres).build()
}
