use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::num::Normalized;

/// A row-major matrix of raw criterion values, one row per alternative and one
/// column per criterion. Construction rejects ragged rows and empty matrices;
/// entry values are validated when the matrix is normalized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct DecisionMatrix {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DecisionMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, EvaluationError> {
        let row_count = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || cols == 0 {
            return Err(EvaluationError::EmptyInput);
        }
        let mut values = Vec::with_capacity(row_count * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(EvaluationError::ShapeMismatch {
                    subject: "matrix row",
                    expected: cols,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            values,
            rows: row_count,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.cols + column]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, column: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |row| self.get(row, column))
    }
}

impl TryFrom<Vec<Vec<f64>>> for DecisionMatrix {
    type Error = EvaluationError;
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DecisionMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DecisionMatrix) -> Self {
        (0..matrix.rows()).map(|row| matrix.row(row).to_vec()).collect()
    }
}

/// The decision matrix rescaled column-by-column into [0, 1]. A derived,
/// read-only artifact: produced by normalization, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<Normalized>>")]
pub struct NormalizedMatrix {
    values: Vec<Normalized>,
    rows: usize,
    cols: usize,
}

impl NormalizedMatrix {
    pub(crate) fn from_values(values: Vec<Normalized>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        Self { values, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, column: usize) -> Normalized {
        self.values[row * self.cols + column]
    }

    pub fn row(&self, row: usize) -> &[Normalized] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, column: usize) -> impl Iterator<Item = Normalized> + '_ {
        (0..self.rows).map(move |row| self.get(row, column))
    }
}

impl From<NormalizedMatrix> for Vec<Vec<Normalized>> {
    fn from(matrix: NormalizedMatrix) -> Self {
        (0..matrix.rows()).map(|row| matrix.row(row).to_vec()).collect()
    }
}
