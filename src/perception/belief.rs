//! Belief grid
//!
//! A probability for every cell of the color map. All filter steps produce a
//! fresh `Belief` rather than writing into the one they read from, since
//! every output cell depends on several input cells.

use crate::common::types::Cell;
use crate::error::{LocalizationError, Result};
use nalgebra::DMatrix;
use std::fmt;

/// Probability distribution over grid cells
#[derive(Debug, Clone, PartialEq)]
pub struct Belief {
    grid: DMatrix<f64>,
}

impl Belief {
    /// Uniform prior: every cell holds `1 / (rows * cols)`
    pub fn uniform(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "belief grid must be non-empty");
        Belief {
            grid: DMatrix::from_element(rows, cols, 1.0 / (rows * cols) as f64),
        }
    }

    /// Build a belief from explicit rows.
    ///
    /// Every cell must be finite and non-negative. The grid is not required
    /// to sum to one, which lets callers feed unnormalized mass into a single update.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LocalizationError::EmptyMap {
                rows: height,
                cols: width,
            });
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(LocalizationError::RaggedMap {
                row,
                expected: width,
                found: cells.len(),
            });
        }

        for (row, cells) in rows.iter().enumerate() {
            if let Some((col, &value)) = cells
                .iter()
                .enumerate()
                .find(|(_, p)| !p.is_finite() || **p < 0.0)
            {
                return Err(LocalizationError::InvalidProbability { row, col, value });
            }
        }

        Ok(Belief {
            grid: DMatrix::from_fn(height, width, |i, j| rows[i][j]),
        })
    }

    pub(crate) fn from_matrix(grid: DMatrix<f64>) -> Self {
        Belief { grid }
    }

    /// Scale the grid so it sums to one. Returns `None` when there is no mass to scale.
    pub(crate) fn normalized(mut grid: DMatrix<f64>) -> Option<Self> {
        let total: f64 = grid.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }
        grid /= total;
        Some(Belief { grid })
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    /// Probability at a cell, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.grid.get((row, col)).copied()
    }

    /// Sum of all cells
    pub fn total(&self) -> f64 {
        self.grid.iter().sum()
    }

    /// Most likely cell and its probability. Ties go to the first cell in row-major order.
    pub fn most_likely(&self) -> (Cell, f64) {
        let mut best = ((0, 0), f64::NEG_INFINITY);
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let p = self.grid[(i, j)];
                if p > best.1 {
                    best = ((i, j), p);
                }
            }
        }
        best
    }

    /// Largest absolute cell difference against `other`, or `None` if shapes differ
    pub fn max_abs_diff(&self, other: &Belief) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.grid
                .iter()
                .zip(other.grid.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Copy out as row vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .map(|i| (0..self.cols()).map(|j| self.grid[(i, j)]).collect())
            .collect()
    }

    /// Underlying matrix, indexed `(row, col)`
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.grid
    }
}

/// Rows of comma separated values to 5 decimals, e.g. `[[0.50000,0.50000],\n [0.00000,0.00000]]`
impl fmt::Display for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .to_rows()
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|p| format!("{:.5}", p)).collect();
                format!("[{}]", cells.join(","))
            })
            .collect();
        write!(f, "[{}]", rows.join(",\n "))
    }
}
