//! Typed failures surfaced by matrix validation and evaluation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// An input's length disagrees with the decision matrix dimensions.
    #[error("{subject}: expected length {expected}, found {found}")]
    ShapeMismatch {
        subject: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("criterion weights sum to {sum}, expected 1")]
    WeightSum { sum: f64 },

    #[error("criterion weight {index} is {value}, expected a finite non-negative value")]
    InvalidWeight { index: usize, value: f64 },

    #[error("matrix entry {value} at row {row}, column {column} is not a non-negative number")]
    NegativeValue {
        row: usize,
        column: usize,
        value: f64,
    },

    /// A degenerate column: an all-zero benefit column, or a zero in a cost column.
    #[error("normalization of column {column} divides by zero")]
    DivisionByZero { column: usize },

    #[error("unrecognized criterion type \"{0}\", expected \"benefit\" or \"cost\"")]
    InvalidCriterionType(String),

    #[error("no alternatives to evaluate")]
    EmptyInput,
}
