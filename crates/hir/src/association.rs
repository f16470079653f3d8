//! Direct association: item-item strength from co-rating counts.
//!
//! For every item pair the builder records how many users rated both items,
//! then normalizes each row so it sums to 1 (or stays all zero when the item
//! was never co-rated).
//!
//! Recording every ordered pair costs O(N²·H) for N items and an average
//! rating-vector length H. That quadratic pass dominates model building.

use crate::catalog::ItemCatalog;
use crate::error::Result;
use crate::matrix::DenseMatrix;
use crate::vector::SparseVector;
use data_loader::ItemId;

/// Accumulates co-rating counts for one catalog.
///
/// `build` consumes the builder, so its output can only be produced once.
pub struct DirectAssociationBuilder<'a> {
    catalog: &'a ItemCatalog,
    counts: DenseMatrix,
}

impl<'a> DirectAssociationBuilder<'a> {
    /// Create an all-zero accumulator, one row per catalog item.
    pub fn new(catalog: &'a ItemCatalog) -> Self {
        let n = catalog.len();
        Self {
            catalog,
            counts: DenseMatrix::zeros(n, n),
        }
    }

    /// Record the association between `first` and `second`.
    ///
    /// A self pair forces the diagonal cell to zero. Any other pair writes
    /// the number of users present in both rating vectors into (first,
    /// second) and (second, first); the last write for a pair wins.
    pub fn record_pair(
        &mut self,
        first: ItemId,
        second: ItemId,
        first_ratings: &SparseVector,
        second_ratings: &SparseVector,
    ) -> Result<()> {
        self.record_count(first, second, first_ratings.intersect_count(second_ratings))
    }

    /// Record an already computed co-rating count for a pair.
    ///
    /// Same cell rules as [`record_pair`](Self::record_pair): a self pair
    /// writes zero, any other pair writes `coratings` symmetrically.
    pub fn record_count(&mut self, first: ItemId, second: ItemId, coratings: usize) -> Result<()> {
        let a = self.catalog.require_index(first)?;
        let b = self.catalog.require_index(second)?;

        if a == b {
            self.counts.set(a, a, 0.0);
        } else {
            self.counts.set(a, b, coratings as f64);
            self.counts.set(b, a, coratings as f64);
        }
        Ok(())
    }

    /// Row-normalize the counts and hand back the frozen matrix.
    pub fn build(self) -> DenseMatrix {
        let mut matrix = self.counts;
        matrix.normalize_rows_l1();
        matrix
    }
}
