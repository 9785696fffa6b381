//! Equal-width histogram binning.
//!
//! Values are partitioned into `min(cap, ceil(sqrt(n)))` equal-width
//! bins between the observed minimum and maximum. Bins are half-open
//! `[start, end)` except the last, which absorbs the maximum (the bin
//! index is clamped so floating-point edge cases cannot escape the
//! range).
//!
//! Two calling contexts use different fixed caps and label precisions:
//! distribution analysis bins into at most 20 with 2-decimal labels,
//! chart generation into at most 10 with 1-decimal labels. The label
//! discrepancy is load-bearing for downstream consumers and must not be
//! unified.
//!
//! # Example
//!
//! ```
//! use datasense::histogram::{bin_values, BinSpec};
//!
//! let values: Vec<f64> = (0..100).map(f64::from).collect();
//! let hist = bin_values(&values, BinSpec::distribution());
//! assert_eq!(hist.bins.len(), 10); // ceil(sqrt(100)) = 10 <= cap 20
//! let total: usize = hist.bins.iter().map(|b| b.count).sum();
//! assert_eq!(total, 100);
//! ```

use serde::Serialize;

/// Bin cap for full distribution analysis.
pub const DISTRIBUTION_MAX_BINS: usize = 20;

/// Bin cap for chart generation.
pub const CHART_MAX_BINS: usize = 10;

/// Binning parameters for one calling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinSpec {
    /// Upper bound on the number of bins.
    pub max_bins: usize,
    /// Decimal places in the bin-range labels.
    pub label_decimals: usize,
}

impl BinSpec {
    /// Distribution-analysis context: up to 20 bins, 2-decimal labels.
    pub fn distribution() -> Self {
        Self {
            max_bins: DISTRIBUTION_MAX_BINS,
            label_decimals: 2,
        }
    }

    /// Chart-generation context: up to 10 bins, 1-decimal labels.
    pub fn chart() -> Self {
        Self {
            max_bins: CHART_MAX_BINS,
            label_decimals: 1,
        }
    }
}

/// One histogram bin: a labeled `[start, end)` interval and its count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Human-readable range label, `"start - end"`.
    pub label: String,
    /// Left edge (inclusive).
    pub start: f64,
    /// Right edge (exclusive, except the final bin).
    pub end: f64,
    /// Number of values in the bin.
    pub count: usize,
}

/// An ordered sequence of equal-width bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Width of each bin; 0.0 for the degenerate single-bin case.
    pub bin_width: f64,
}

impl Histogram {
    /// Total count across all bins.
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Bins numeric values into equal-width intervals.
///
/// Empty input yields zero bins. A constant column (`max == min`) yields
/// a single bin containing every value, since an equal-width split of a
/// zero-length extent has no finite width.
pub fn bin_values(values: &[f64], spec: BinSpec) -> Histogram {
    if values.is_empty() {
        return Histogram {
            bins: Vec::new(),
            bin_width: 0.0,
        };
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    if max == min {
        let bin = HistogramBin {
            label: range_label(min, max, spec.label_decimals),
            start: min,
            end: max,
            count: values.len(),
        };
        return Histogram {
            bins: vec![bin],
            bin_width: 0.0,
        };
    }

    let bin_count = spec
        .max_bins
        .min((values.len() as f64).sqrt().ceil() as usize)
        .max(1);
    let bin_width = (max - min) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - min) / bin_width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + i as f64 * bin_width;
            let end = if i == bin_count - 1 {
                max
            } else {
                min + (i + 1) as f64 * bin_width
            };
            HistogramBin {
                label: range_label(start, end, spec.label_decimals),
                start,
                end,
                count,
            }
        })
        .collect();

    Histogram { bins, bin_width }
}

fn range_label(start: f64, end: f64, decimals: usize) -> String {
    format!("{start:.decimals$} - {end:.decimals$}")
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn counts_sum_to_value_count() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0, 9.0, 9.5];
        let hist = bin_values(&values, BinSpec::distribution());
        assert_eq!(hist.total_count(), values.len());
    }

    #[test]
    fn bin_count_follows_sqrt_rule() {
        // 7 values: ceil(sqrt(7)) = 3.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let hist = bin_values(&values, BinSpec::distribution());
        assert_eq!(hist.bins.len(), 3);
    }

    #[test]
    fn distribution_cap_is_twenty() {
        let values: Vec<f64> = (0..1000).map(f64::from).collect();
        let hist = bin_values(&values, BinSpec::distribution());
        assert_eq!(hist.bins.len(), 20);
    }

    #[test]
    fn chart_cap_is_ten() {
        let values: Vec<f64> = (0..1000).map(f64::from).collect();
        let hist = bin_values(&values, BinSpec::chart());
        assert_eq!(hist.bins.len(), 10);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let values = [0.0, 1.0, 2.0, 3.0, 10.0];
        let hist = bin_values(&values, BinSpec::distribution());
        assert_eq!(hist.bins.last().unwrap().count, 1);
        assert_eq!(hist.bins.last().unwrap().end, 10.0);
    }

    #[test]
    fn constant_column_gets_single_bin() {
        let values = [5.0, 5.0, 5.0, 5.0];
        let hist = bin_values(&values, BinSpec::distribution());
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 4);
        assert_eq!(hist.bins[0].label, "5.00 - 5.00");
        assert_eq!(hist.bin_width, 0.0);
    }

    #[test]
    fn empty_input_yields_no_bins() {
        let hist = bin_values(&[], BinSpec::chart());
        assert!(hist.bins.is_empty());
    }

    #[test]
    fn label_precision_differs_by_context() {
        let values = [0.0, 1.0, 2.0, 3.0];
        let dist = bin_values(&values, BinSpec::distribution());
        let chart = bin_values(&values, BinSpec::chart());
        assert_eq!(dist.bins[0].label, "0.00 - 1.50");
        assert_eq!(chart.bins[0].label, "0.0 - 1.5");
    }

    #[test]
    fn bins_are_half_open() {
        // 4 values over [0, 2] -> 2 bins of width 1; the boundary value
        // 1.0 belongs to the second bin.
        let values = [0.0, 1.0, 1.5, 2.0];
        let hist = bin_values(&values, BinSpec::distribution());
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[1].count, 3);
    }

    proptest! {
        #[test]
        fn values_are_partitioned_across_bins(
            values in proptest::collection::vec(-1.0e6..1.0e6f64, 1..200)
        ) {
            let hist = bin_values(&values, BinSpec::distribution());
            // Counting assigns each value to exactly one bin, so the
            // counts always partition the input.
            prop_assert_eq!(hist.total_count(), values.len());
            // And every value lies within the extent of some bin.
            for &v in &values {
                prop_assert!(hist.bins.iter().any(|b| v >= b.start && v <= b.end));
            }
        }

        #[test]
        fn max_always_in_last_bin(
            values in proptest::collection::vec(-1.0e6..1.0e6f64, 2..200)
        ) {
            let hist = bin_values(&values, BinSpec::chart());
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let last = hist.bins.last().unwrap();
            prop_assert!(max >= last.start && max <= last.end);
            prop_assert!(last.count >= 1);
        }
    }
}
