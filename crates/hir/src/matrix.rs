//! Dense row-major matrix used for the association matrix and genre factors.
//!
//! The model only needs element get/set, a row view, a row L1 norm, row
//! assignment and left multiplication by a row vector, plus in-place row
//! normalization built on top of those.

use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayView1, Axis};

#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Array2<f64>,
}

impl DenseMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[[row, col]] = value;
    }

    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.data.row(row)
    }

    /// Sum of absolute values in one row
    pub fn row_l1_norm(&self, row: usize) -> f64 {
        self.data.row(row).iter().map(|x| x.abs()).sum()
    }

    /// Overwrite one row. `values` must have `n_cols` entries.
    pub fn set_row(&mut self, row: usize, values: &[f64]) {
        self.data
            .row_mut(row)
            .assign(&ArrayView1::from(values));
    }

    /// Left multiplication `v × self`, one output entry per column.
    ///
    /// `v` must have `n_rows` entries.
    pub fn pre_multiply(&self, v: ArrayView1<'_, f64>) -> Array1<f64> {
        v.dot(&self.data)
    }

    /// Transposed copy
    pub fn transposed(&self) -> DenseMatrix {
        DenseMatrix {
            data: self.data.t().to_owned(),
        }
    }

    /// Divide every row by its L1 norm. Rows whose norm is exactly zero are
    /// left untouched, so no NaN or infinity is ever produced.
    ///
    /// Rows are independent and normalized in parallel.
    pub fn normalize_rows_l1(&mut self) {
        self.data
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                let norm: f64 = row.iter().map(|x| x.abs()).sum();
                if norm != 0.0 {
                    row.mapv_inplace(|x| x / norm);
                }
            });
    }

    /// Plain (signed) sum of every row
    pub fn row_sums(&self) -> Vec<f64> {
        self.data.sum_axis(Axis(1)).to_vec()
    }
}
