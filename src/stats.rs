//! Descriptive statistics over a single column.
//!
//! Numeric aggregates (mean, median, quartiles, spread) are computed
//! over the cells that coerce to finite numbers; non-numeric cells are
//! silently dropped from those aggregates but still participate in
//! `count` and `mode`. With zero numeric cells only `count` and `mode`
//! are populated.
//!
//! # Example
//!
//! ```
//! use datasense::stats::summarize;
//! use datasense::value::CellValue;
//!
//! let cells: Vec<CellValue> = ["1", "2", "3", "4", "5"]
//!     .iter()
//!     .map(|v| CellValue::from_raw(v))
//!     .collect();
//! let summary = summarize(&cells);
//! assert_eq!(summary.mean, Some(3.0));
//! assert_eq!(summary.median, Some(3.0));
//! assert_eq!(summary.quartiles.as_ref().map(|q| q.q1), Some(2.0));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::value::CellValue;

/// Quartile boundaries (25th, 50th, 75th percentiles).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

/// Descriptive statistics for one column.
///
/// `count` covers all non-missing cells regardless of type. The numeric
/// aggregates are present only when at least one cell coerces to a
/// finite number; `std_dev` additionally requires two. `mode` is present
/// whenever the column has any non-missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct StatisticalSummary {
    /// Number of non-missing cells (numeric or not).
    pub count: usize,
    /// Arithmetic mean.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// 50th percentile, linear interpolation between order statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    /// Most frequent value across ALL non-missing cells; ties break
    /// toward the earliest first occurrence in row order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CellValue>,
    /// Sample standard deviation (n − 1 divisor); requires n ≥ 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartiles: Option<Quartiles>,
}

/// Computes descriptive statistics for a column of raw cells.
pub fn summarize(cells: &[CellValue]) -> StatisticalSummary {
    let count = cells.iter().filter(|c| !c.is_missing()).count();
    let mode = mode_of(cells);

    let mut numbers: Vec<f64> = cells.iter().filter_map(CellValue::as_number).collect();
    if numbers.is_empty() {
        return StatisticalSummary {
            count,
            mode,
            ..StatisticalSummary::default()
        };
    }
    numbers.sort_by(f64::total_cmp);

    let n = numbers.len();
    let mean = numbers.iter().sum::<f64>() / n as f64;
    let min = numbers[0];
    let max = numbers[n - 1];
    let median = percentile(&numbers, 0.5);
    let quartiles = Quartiles {
        q1: percentile(&numbers, 0.25),
        q2: median,
        q3: percentile(&numbers, 0.75),
    };
    let std_dev = if n >= 2 {
        let ss: f64 = numbers.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    } else {
        None
    };

    StatisticalSummary {
        count,
        mean: Some(mean),
        median: Some(median),
        mode,
        std_dev,
        min: Some(min),
        max: Some(max),
        range: Some(max - min),
        quartiles: Some(quartiles),
    }
}

/// Interpolated percentile over an ascending-sorted slice.
///
/// Uses the rank `p × (n − 1)` convention: the result is the linear
/// interpolation between the two order statistics bracketing the rank.
/// `p` is a fraction in `[0, 1]`. Panics on an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of empty slice");
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Most frequent value over all non-missing cells.
///
/// Frequencies are keyed by canonical form, so `Number(25.0)` and
/// `Text("25")` count as the same observation. Ties break toward the
/// value whose first occurrence comes earliest in row order, which makes
/// the result deterministic for any input.
fn mode_of(cells: &[CellValue]) -> Option<CellValue> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<(String, CellValue)> = Vec::new();

    for cell in cells {
        let Some(key) = cell.canonical() else {
            continue;
        };
        let key = key.into_owned();
        match counts.entry(key.clone()) {
            Entry::Occupied(mut e) => *e.get_mut() += 1,
            Entry::Vacant(e) => {
                e.insert(1);
                first_seen.push((key, cell.clone()));
            }
        }
    }

    let mut best: Option<(&CellValue, usize)> = None;
    for (key, cell) in &first_seen {
        let count = counts[key];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((cell, count));
        }
    }
    best.map(|(cell, _)| cell.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────
