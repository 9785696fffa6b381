//! Pairwise Pearson correlation across numeric columns.
//!
//! Every ordered pair of inferred-numeric columns gets a coefficient:
//! the diagonal is pinned to exactly 1.0 without computation, and every
//! off-diagonal cell is computed independently (the matrix is symmetric
//! because Pearson is, not because cells are mirrored — a property the
//! tests pin down).
//!
//! Pairs are extracted by shared row index: a row contributes to the
//! (A, B) cell only when both cells coerce to numeric. Degenerate cells
//! (fewer than 2 pairs, or a zero-variance side) record 0.0 — a
//! documented fallback, not "unknown".
//!
//! # Example
//!
//! ```
//! use datasense::correlation::{correlation_matrix, CorrelationOutcome};
//! use datasense::dataset::Dataset;
//! use datasense::value::CellValue;
//!
//! let mut ds = Dataset::new();
//! ds.add_column("x", vec![1.0, 2.0, 3.0].into_iter().map(CellValue::number).collect()).unwrap();
//! ds.add_column("y", vec![2.0, 4.0, 6.0].into_iter().map(CellValue::number).collect()).unwrap();
//!
//! match correlation_matrix(&ds) {
//!     CorrelationOutcome::Matrix(m) => {
//!         assert_eq!(m.get("x", "y"), Some(1.0)); // y = 2x
//!     }
//!     CorrelationOutcome::Insufficient { .. } => unreachable!(),
//! }
//! ```

use serde::Serialize;

use crate::dataset::{paired_numeric, Dataset};
use crate::inference::{infer_column_type, ColumnType};
use crate::value::CellValue;

/// Symmetric correlation matrix over the dataset's numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Numeric column names, in dataset column order.
    pub columns: Vec<String>,
    /// Row-major coefficients; `coefficients[i][j]` pairs
    /// `columns[i]` with `columns[j]`.
    pub coefficients: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Looks up the coefficient for a pair of column names.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.coefficients[i][j])
    }
}

/// Result of correlation analysis.
///
/// Fewer than two numeric columns is expected input, not an error: the
/// caller receives an explanatory message payload instead of a matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CorrelationOutcome {
    Matrix(CorrelationMatrix),
    Insufficient {
        message: String,
        /// The numeric columns that were found (possibly zero or one).
        numeric_columns: Vec<String>,
    },
}

/// Computes the Pearson sample correlation of two equal-length sequences.
///
/// Returns 0.0 for fewer than 2 points or when either side has zero
/// variance. The result is clamped to `[-1, 1]` to absorb floating-point
/// overshoot.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    if x.len() < 2 {
        return 0.0;
    }

    let n = x.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
        sum_y2 += yi * yi;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        (numerator / denominator).clamp(-1.0, 1.0)
    }
}

/// Computes the full pairwise correlation matrix for a dataset.
///
/// Columns are included when their inferred type is numeric. Each cell
/// is computed from the rows where both columns are numeric-coercible;
/// the diagonal is fixed at exactly 1.0.
pub fn correlation_matrix(dataset: &Dataset) -> CorrelationOutcome {
    let numeric: Vec<(&str, &[CellValue])> = dataset
        .iter()
        .filter(|(_, cells)| infer_column_type(cells) == ColumnType::Numeric)
        .collect();

    if numeric.len() < 2 {
        return CorrelationOutcome::Insufficient {
            message: format!(
                "correlation requires at least 2 numeric columns; found {}",
                numeric.len()
            ),
            numeric_columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        };
    }

    let columns: Vec<String> = numeric.iter().map(|(name, _)| name.to_string()).collect();
    let coefficients: Vec<Vec<f64>> = numeric
        .iter()
        .enumerate()
        .map(|(i, (_, a))| {
            numeric
                .iter()
                .enumerate()
                .map(|(j, (_, b))| {
                    if i == j {
                        1.0
                    } else {
                        let (xs, ys) = paired_numeric(a, b);
                        pearson(&xs, &ys)
                    }
                })
                .collect()
        })
        .collect();

    CorrelationOutcome::Matrix(CorrelationMatrix {
        columns,
        coefficients,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────
