//! The immutable HIR model and its read-only queries.

use crate::catalog::ItemCatalog;
use crate::error::Result;
use crate::matrix::DenseMatrix;
use data_loader::ItemId;
use ndarray::{Array1, ArrayView1};

/// Direct-association matrix plus the two proximity factors, all indexed by
/// one catalog.
///
/// Nothing mutates a model after construction, so it can be shared behind an
/// `Arc` and queried from any number of threads without locking.
#[derive(Debug, Clone)]
pub struct HirModel {
    catalog: ItemCatalog,
    /// N × N, rows sum to 0 or 1, zero diagonal
    direct_association: DenseMatrix,
    /// N × G, rows sum to 0 or 1
    row_factor: DenseMatrix,
    /// G × N, rows sum to 0 or 1
    column_factor: DenseMatrix,
}

impl HirModel {
    pub(crate) fn new(
        catalog: ItemCatalog,
        direct_association: DenseMatrix,
        row_factor: DenseMatrix,
        column_factor: DenseMatrix,
    ) -> Self {
        let n = catalog.len();
        debug_assert_eq!(direct_association.shape(), (n, n));
        debug_assert_eq!(row_factor.n_rows(), n);
        debug_assert_eq!(column_factor.shape(), (row_factor.n_cols(), n));

        Self {
            catalog,
            direct_association,
            row_factor,
            column_factor,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn direct_association(&self) -> &DenseMatrix {
        &self.direct_association
    }

    pub fn row_factor(&self) -> &DenseMatrix {
        &self.row_factor
    }

    pub fn column_factor(&self) -> &DenseMatrix {
        &self.column_factor
    }

    pub fn genre_dimensionality(&self) -> usize {
        self.row_factor.n_cols()
    }

    /// Direct-association row of `item`, one entry per candidate in the
    /// order given.
    pub fn coratings_vector(&self, item: ItemId, candidates: &[ItemId]) -> Result<Vec<f64>> {
        let row = self.catalog.require_index(item)?;
        let positions = self.catalog.require_indices(candidates)?;
        Ok(restrict(self.direct_row(row), &positions))
    }

    /// Genre-mediated similarity between `item` and each candidate, in the
    /// order given.
    pub fn proximity_vector(&self, item: ItemId, candidates: &[ItemId]) -> Result<Vec<f64>> {
        let row = self.catalog.require_index(item)?;
        let positions = self.catalog.require_indices(candidates)?;
        Ok(restrict(self.proximity_row(row).view(), &positions))
    }

    /// Association row by catalog position
    pub(crate) fn direct_row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.direct_association.row(row)
    }

    /// `row_factor[row] × column_factor` over the whole catalog
    pub(crate) fn proximity_row(&self, row: usize) -> Array1<f64> {
        self.column_factor.pre_multiply(self.row_factor.row(row))
    }
}

fn restrict(values: ArrayView1<'_, f64>, positions: &[usize]) -> Vec<f64> {
    positions.iter().map(|&pos| values[pos]).collect()
}
