//! Ranking of decision alternatives with the Weighted Aggregated Sum Product
//! Assessment (WASPAS) method. Callers hand over a decision matrix, one weight
//! and criterion type per column, and one display name per row; they get back
//! the normalized matrix, a composite score per alternative, and the index of
//! the best alternative.

pub mod criteria;
pub mod error;
pub mod matrix;
pub mod num;

pub use ordered_float::NotNan;

pub use crate::criteria::{aggregate, aggregate_with_lambda, normalize, CriterionType};
pub use crate::error::EvaluationError;
pub use crate::matrix::{DecisionMatrix, NormalizedMatrix};
pub use crate::num::{Normalized, Weight};

use serde::{Deserialize, Serialize};

/// Tolerance applied when checking that the criterion weights sum to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// One evaluation request: the immutable parameter bundle handed over by the
/// calling layer. `alternatives` carries display labels only; it plays no
/// numeric role beyond its length being checked against the matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub matrix: DecisionMatrix,
    pub weights: Vec<f64>,
    pub criteria: Vec<CriterionType>,
    pub alternatives: Vec<String>,
}

/// The result bundle: freshly allocated per evaluation, no state shared
/// between requests.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub normalized: NormalizedMatrix,
    pub scores: Vec<NotNan<f64>>,
    pub best: usize,
}

impl Evaluation {
    /// Run the normalize → aggregate → select pipeline with the standard
    /// WASPAS split of 0.5 between the sum and product terms.
    pub fn evaluate(&self) -> Result<Outcome, EvaluationError> {
        self.evaluate_with_lambda(Normalized::HALF)
    }

    /// [`Evaluation::evaluate`] with the WSM/WPM split `λ` as a parameter.
    pub fn evaluate_with_lambda(&self, lambda: Normalized) -> Result<Outcome, EvaluationError> {
        if self.alternatives.len() != self.matrix.rows() {
            return Err(EvaluationError::ShapeMismatch {
                subject: "alternative names",
                expected: self.matrix.rows(),
                found: self.alternatives.len(),
            });
        }
        if self.weights.len() != self.matrix.cols() {
            return Err(EvaluationError::ShapeMismatch {
                subject: "weights",
                expected: self.matrix.cols(),
                found: self.weights.len(),
            });
        }
        if self.criteria.len() != self.matrix.cols() {
            return Err(EvaluationError::ShapeMismatch {
                subject: "criterion types",
                expected: self.matrix.cols(),
                found: self.criteria.len(),
            });
        }

        let mut weights = Vec::with_capacity(self.weights.len());
        for (index, &value) in self.weights.iter().enumerate() {
            let weight = Weight::new(value)
                .filter(|w| w.as_f64().is_finite())
                .ok_or(EvaluationError::InvalidWeight { index, value })?;
            weights.push(weight);
        }
        let sum: f64 = weights.iter().map(|w| w.as_f64()).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EvaluationError::WeightSum { sum });
        }

        let normalized = normalize(&self.matrix, &self.criteria)?;
        let scores = aggregate_with_lambda(&normalized, &weights, lambda)?;
        let best = select_best(&scores)?;
        Ok(Outcome {
            normalized,
            scores,
            best,
        })
    }
}

impl Outcome {
    /// All alternative indices ordered from best to worst score. Equal scores
    /// keep their original order, so `ranking()[0] == best`.
    pub fn ranking(&self) -> Vec<usize> {
        ranking(&self.scores)
    }
}

/// Index of the maximum score. Ties go to the lowest index.
pub fn select_best(scores: &[NotNan<f64>]) -> Result<usize, EvaluationError> {
    let mut best: Option<usize> = None;
    for (index, score) in scores.iter().enumerate() {
        if best.map_or(true, |b| *score > scores[b]) {
            best = Some(index);
        }
    }
    best.ok_or(EvaluationError::EmptyInput)
}

/// Indices ordered by descending score, stable across ties.
pub fn ranking(scores: &[NotNan<f64>]) -> Vec<usize> {
    let order = permutation::sort_by_key(scores, |score| std::cmp::Reverse(*score));
    let indices: Vec<usize> = (0..scores.len()).collect();
    order.apply_slice(&indices[..])
}
