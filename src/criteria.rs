use std::str::FromStr;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::matrix::{DecisionMatrix, NormalizedMatrix};
use crate::num::{Normalized, Weight};

/// Direction of preference for a criterion column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionType {
    /// Higher raw values are better. Normalized against the column maximum.
    Benefit,
    /// Lower raw values are better. Normalized as the column minimum over each value.
    Cost,
}

impl FromStr for CriterionType {
    type Err = EvaluationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "benefit" => Ok(Self::Benefit),
            "cost" => Ok(Self::Cost),
            other => Err(EvaluationError::InvalidCriterionType(other.to_owned())),
        }
    }
}

impl std::fmt::Display for CriterionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Benefit => write!(f, "benefit"),
            Self::Cost => write!(f, "cost"),
        }
    }
}

/// Rescale each column of the matrix into [0, 1] according to its criterion
/// type. The row achieving a benefit column's maximum normalizes to exactly 1,
/// as does the row achieving a cost column's minimum.
///
/// Degenerate columns are rejected rather than propagated as NaN: an all-zero
/// benefit column has no maximum to divide by, and a zero in a cost column
/// would put a zero in a denominator.
pub fn normalize(
    matrix: &DecisionMatrix,
    criteria: &[CriterionType],
) -> Result<NormalizedMatrix, EvaluationError> {
    if criteria.len() != matrix.cols() {
        return Err(EvaluationError::ShapeMismatch {
            subject: "criterion types",
            expected: matrix.cols(),
            found: criteria.len(),
        });
    }
    for row in 0..matrix.rows() {
        for column in 0..matrix.cols() {
            let value = matrix.get(row, column);
            if !value.is_finite() || value < 0.0 {
                return Err(EvaluationError::NegativeValue { row, column, value });
            }
        }
    }

    let (rows, cols) = (matrix.rows(), matrix.cols());
    let mut values = vec![Normalized::ZERO; rows * cols];
    for (column, criterion) in criteria.iter().enumerate() {
        match criterion {
            CriterionType::Benefit => {
                let max = matrix.column(column).fold(0.0_f64, f64::max);
                if max == 0.0 {
                    return Err(EvaluationError::DivisionByZero { column });
                }
                for row in 0..rows {
                    // `+ 0.0` canonicalizes a -0.0 entry, which passes the
                    // non-negativity check but would divide to -0.0.
                    let scaled = (matrix.get(row, column) + 0.0) / max;
                    values[row * cols + column] = Normalized::new(scaled).unwrap();
                }
            }
            CriterionType::Cost => {
                let min = matrix.column(column).fold(f64::INFINITY, f64::min);
                if min == 0.0 {
                    return Err(EvaluationError::DivisionByZero { column });
                }
                for row in 0..rows {
                    let scaled = min / matrix.get(row, column);
                    values[row * cols + column] = Normalized::new(scaled).unwrap();
                }
            }
        }
    }
    Ok(NormalizedMatrix::from_values(values, rows, cols))
}

/// Combine normalized values and weights into one composite score per
/// alternative using the WASPAS formula: the even split between the weighted
/// sum model and the weighted product model.
pub fn aggregate(
    normalized: &NormalizedMatrix,
    weights: &[Weight],
) -> Result<Vec<NotNan<f64>>, EvaluationError> {
    aggregate_with_lambda(normalized, weights, Normalized::HALF)
}

/// [`aggregate`] with the WSM/WPM split exposed as a parameter:
/// `Qi = λ·Σ_j(n_ij·w_j) + (1−λ)·Π_j(n_ij^w_j)`. `λ = 1` is the pure weighted
/// sum model, `λ = 0` the pure weighted product model.
pub fn aggregate_with_lambda(
    normalized: &NormalizedMatrix,
    weights: &[Weight],
    lambda: Normalized,
) -> Result<Vec<NotNan<f64>>, EvaluationError> {
    if weights.len() != normalized.cols() {
        return Err(EvaluationError::ShapeMismatch {
            subject: "weights",
            expected: normalized.cols(),
            found: weights.len(),
        });
    }
    let lambda = lambda.as_f64();
    let mut scores = Vec::with_capacity(normalized.rows());
    for row in 0..normalized.rows() {
        let row = normalized.row(row);
        let sum_term: f64 = row
            .iter()
            .zip(weights)
            .map(|(value, weight)| value.as_f64() * weight.as_f64())
            .sum();
        let product_term = row
            .iter()
            .zip(weights)
            .map(|(value, weight)| value.pow(*weight))
            .product::<Normalized>()
            .as_f64();
        let score = lambda * sum_term + (1.0 - lambda) * product_term;
        scores.push(NotNan::new(score).unwrap());
    }
    Ok(scores)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::num::assert_within;

    fn matrix(rows: Vec<Vec<f64>>) -> DecisionMatrix {
        DecisionMatrix::from_rows(rows).unwrap()
    }

    fn weights(values: &[f64]) -> Vec<Weight> {
        values.iter().map(|&w| Weight::new(w).unwrap()).collect()
    }

    #[test]
    fn benefit_column_divides_by_max() {
        let normalized = normalize(
            &matrix(vec![vec![12.0], vec![8.0], vec![16.0]]),
            &[CriterionType::Benefit],
        )
        .unwrap();
        assert_within(normalized.get(0, 0).as_f64(), 0.75, 1e-12);
        assert_within(normalized.get(1, 0).as_f64(), 0.5, 1e-12);
        assert_within(normalized.get(2, 0).as_f64(), 1.0, 1e-12);
    }

    #[test]
    fn cost_column_divides_min_by_value() {
        let normalized = normalize(
            &matrix(vec![vec![250.0], vec![200.0], vec![300.0]]),
            &[CriterionType::Cost],
        )
        .unwrap();
        assert_within(normalized.get(0, 0).as_f64(), 0.8, 1e-12);
        assert_within(normalized.get(1, 0).as_f64(), 1.0, 1e-12);
        assert_within(normalized.get(2, 0).as_f64(), 2.0 / 3.0, 1e-12);
    }

    #[test]
    fn equal_benefit_column_normalizes_to_ones() {
        let normalized = normalize(
            &matrix(vec![vec![5.0], vec![5.0], vec![5.0]]),
            &[CriterionType::Benefit],
        )
        .unwrap();
        for row in 0..3 {
            assert_eq!(normalized.get(row, 0), Normalized::ONE);
        }
    }

    #[test]
    fn unequal_cost_column_peaks_at_its_minimum_row() {
        let normalized = normalize(
            &matrix(vec![vec![0.1], vec![513.2]]),
            &[CriterionType::Cost],
        )
        .unwrap();
        assert_eq!(normalized.column(0).max(), Some(Normalized::ONE));
        assert!(normalized.get(1, 0) < Normalized::ONE);
    }

    #[test]
    fn negative_zero_entry_normalizes_like_zero() {
        let normalized = normalize(
            &matrix(vec![vec![-0.0], vec![4.0]]),
            &[CriterionType::Benefit],
        )
        .unwrap();
        assert_eq!(normalized.get(0, 0), Normalized::ZERO);
        assert_eq!(normalized.get(1, 0), Normalized::ONE);
    }

    #[test]
    fn negative_zero_in_cost_column_rejected() {
        let result = normalize(
            &matrix(vec![vec![3.0], vec![-0.0]]),
            &[CriterionType::Cost],
        );
        assert_eq!(result, Err(EvaluationError::DivisionByZero { column: 0 }));
    }

    #[test]
    fn all_zero_benefit_column_rejected() {
        let result = normalize(
            &matrix(vec![vec![1.0, 0.0], vec![2.0, 0.0]]),
            &[CriterionType::Benefit, CriterionType::Benefit],
        );
        assert_eq!(result, Err(EvaluationError::DivisionByZero { column: 1 }));
    }

    #[test]
    fn zero_in_cost_column_rejected() {
        let result = normalize(
            &matrix(vec![vec![3.0], vec![0.0]]),
            &[CriterionType::Cost],
        );
        assert_eq!(result, Err(EvaluationError::DivisionByZero { column: 0 }));
    }

    #[test]
    fn negative_entry_rejected() {
        let result = normalize(
            &matrix(vec![vec![1.0, -2.0]]),
            &[CriterionType::Benefit, CriterionType::Benefit],
        );
        assert_eq!(
            result,
            Err(EvaluationError::NegativeValue {
                row: 0,
                column: 1,
                value: -2.0,
            })
        );
    }

    #[test]
    fn nan_entry_rejected() {
        let result = normalize(&matrix(vec![vec![f64::NAN]]), &[CriterionType::Benefit]);
        assert!(matches!(
            result,
            Err(EvaluationError::NegativeValue {
                row: 0,
                column: 0,
                ..
            })
        ));
    }

    #[test]
    fn zero_to_the_zero_counts_as_one() {
        // A zero-weight criterion contributes a factor of 1 to the product
        // term, even for the row whose normalized value is 0.
        let normalized = normalize(
            &matrix(vec![vec![0.0, 1.0], vec![4.0, 1.0]]),
            &[CriterionType::Benefit, CriterionType::Benefit],
        )
        .unwrap();
        let scores = aggregate(&normalized, &weights(&[0.0, 1.0])).unwrap();
        assert_eq!(scores[0].into_inner(), 1.0);
        assert_eq!(scores[1].into_inner(), 1.0);
    }

    #[test]
    fn lambda_one_is_the_weighted_sum_model() {
        let normalized = normalize(
            &matrix(vec![vec![12.0, 250.0], vec![16.0, 200.0]]),
            &[CriterionType::Benefit, CriterionType::Cost],
        )
        .unwrap();
        let weights = weights(&[0.25, 0.75]);
        let scores = aggregate_with_lambda(&normalized, &weights, Normalized::ONE).unwrap();
        assert_within(scores[0].into_inner(), 0.25 * 0.75 + 0.75 * 0.8, 1e-12);
        assert_within(scores[1].into_inner(), 0.25 * 1.0 + 0.75 * 1.0, 1e-12);
    }

    #[test]
    fn lambda_zero_is_the_weighted_product_model() {
        let normalized = normalize(
            &matrix(vec![vec![12.0, 250.0], vec![16.0, 200.0]]),
            &[CriterionType::Benefit, CriterionType::Cost],
        )
        .unwrap();
        let weights = weights(&[0.25, 0.75]);
        let scores = aggregate_with_lambda(&normalized, &weights, Normalized::ZERO).unwrap();
        assert_within(
            scores[0].into_inner(),
            0.75_f64.powf(0.25) * 0.8_f64.powf(0.75),
            1e-12,
        );
        assert_within(scores[1].into_inner(), 1.0, 1e-12);
    }

    #[test]
    fn criterion_type_parses_from_lowercase_names() {
        assert_eq!("benefit".parse::<CriterionType>(), Ok(CriterionType::Benefit));
        assert_eq!("cost".parse::<CriterionType>(), Ok(CriterionType::Cost));
    }

    #[test]
    fn unrecognized_criterion_type_rejected() {
        assert_eq!(
            "profit".parse::<CriterionType>(),
            Err(EvaluationError::InvalidCriterionType("profit".to_owned()))
        );
    }
}
