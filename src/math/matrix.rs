use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};
use crate::math::init::WeightInit;

/// Dense row-major matrix. Rows are stored as individual vectors so a single
/// row can be handed out as a slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Shape: (rows, cols), every entry drawn independently from `init`.
    pub fn from_init<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        init: WeightInit,
        rng: &mut R,
    ) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for row in res.data.iter_mut() {
            for value in row.iter_mut() {
                *value = init.sample(rng);
            }
        }

        res
    }

    /// Builds a matrix from explicit rows. Rejects an empty matrix and rows
    /// of unequal length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = match data.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(NnError::ZeroDimension { name: "matrix" }),
        };

        if let Some((row, bad)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(NnError::RaggedRow { row, expected: cols, actual: bad.len() });
        }

        Ok(Matrix { rows: data.len(), cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i`, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.data.get(i).map(Vec::as_slice)
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i]
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(Vec::as_slice)
    }
}
