//! Genre factors of the proximity relation.
//!
//! Proximity between two items is `row_factor[i] × column_factor`, where the
//! row factor spreads an item over its genres and the column factor spreads
//! each genre back over the items carrying it. Both factors are derived from
//! the same item × genre matrix; items without genre data contribute zero
//! rows.

use crate::catalog::ItemCatalog;
use crate::error::{HirError, Result};
use crate::matrix::DenseMatrix;
use crate::source::GenreSource;

/// Copy every item's genre vector into an item × genre matrix.
fn genre_matrix(catalog: &ItemCatalog, source: &impl GenreSource) -> Result<DenseMatrix> {
    let expected = source.genre_dimensionality();
    let mut matrix = DenseMatrix::zeros(catalog.len(), expected);

    for (row, &item) in catalog.ids().iter().enumerate() {
        let Some(genres) = source.item_genres(item) else { continue };
        if genres.len() != expected {
            return Err(HirError::InconsistentGenreDimensionality {
                item,
                expected,
                found: genres.len(),
            });
        }
        matrix.set_row(row, genres);
    }
    Ok(matrix)
}

/// Item × genre matrix whose rows are normalized to sum to 1.
#[derive(Debug, Clone)]
pub struct GenreRowStochasticFactor {
    genres: DenseMatrix,
}

impl GenreRowStochasticFactor {
    pub fn new(catalog: &ItemCatalog, source: &impl GenreSource) -> Result<Self> {
        Ok(Self {
            genres: genre_matrix(catalog, source)?,
        })
    }

    pub fn genre_dimensionality(&self) -> usize {
        self.genres.n_cols()
    }

    /// Each item's genre weights divided by their L1 norm; items without
    /// genre mass keep an all-zero row.
    ///
    /// Recomputed from the source matrix on every call.
    pub fn row_stochastic(&self) -> DenseMatrix {
        let mut matrix = self.genres.clone();
        matrix.normalize_rows_l1();
        matrix
    }
}

/// Genre × item matrix whose genre rows are normalized across items.
///
/// Read column-wise, every genre's distribution over items sums to 1.
#[derive(Debug, Clone)]
pub struct GenreColumnStochasticFactor {
    transposed: DenseMatrix,
}

impl GenreColumnStochasticFactor {
    pub fn new(catalog: &ItemCatalog, source: &impl GenreSource) -> Result<Self> {
        Ok(Self {
            transposed: genre_matrix(catalog, source)?.transposed(),
        })
    }

    pub fn genre_dimensionality(&self) -> usize {
        self.transposed.n_rows()
    }

    /// Each genre row divided by its L1 norm; genres no item carries stay
    /// zero.
    pub fn column_stochastic(&self) -> DenseMatrix {
        let mut matrix = self.transposed.clone();
        matrix.normalize_rows_l1();
        matrix
    }
}
