//! Single-predictor ordinary least squares.
//!
//! Fits `y ≈ slope·x + intercept` minimizing squared error, and reports
//! R² against the fitted line. Pairs follow the same shared-row rule as
//! [`correlation`](crate::correlation): a row participates only when
//! both cells coerce to numeric.
//!
//! # Example
//!
//! ```
//! use datasense::regression::fit_line;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [2.0, 4.0, 6.0, 8.0];
//! let fit = fit_line(&x, &y).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert!(fit.intercept.abs() < 1e-12);
//! assert!((fit.r_squared - 1.0).abs() < 1e-12);
//! ```

use serde::Serialize;

/// A fitted least-squares line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination against the fitted line.
    pub r_squared: f64,
    /// Number of (x, y) pairs used in the fit.
    pub n: usize,
}

/// Fits an OLS line through equal-length `(x, y)` sequences.
///
/// Returns `None` ("unavailable") for fewer than 2 pairs or when `x`
/// has zero variance — a vertical spread has no finite slope. A
/// constant `y` fits its own mean exactly, so a zero total sum of
/// squares pins R² to 1.0.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<RegressionFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(xi, yi)| xi * yi).sum();
    let sum_x2: f64 = x.iter().map(|xi| xi * xi).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_tot: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| {
            let predicted = slope * xi + intercept;
            (yi - predicted).powi(2)
        })
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(RegressionFit {
        slope,
        intercept,
        r_squared,
        n: x.len(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────
