//! Renderer-agnostic chart payloads.
//!
//! Reshapes engine output into plain data a charting frontend can bind
//! directly: bar charts carry one labeled series of frequency counts
//! (from the 10-bin histogram variant), scatter charts carry row-aligned
//! `(x, y)` points. No drawing, no renderer coupling — just shapes and
//! axis-label hints.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dataset::{paired_numeric, Dataset};
use crate::error::AnalysisError;
use crate::histogram::{bin_values, BinSpec};
use crate::value::CellValue;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Histogram rendered as a bar chart.
    Bar,
    /// Scatter plot of two numeric columns.
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => write!(f, "bar"),
            Self::Scatter => write!(f, "scatter"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(Self::Bar),
            "scatter" => Ok(Self::Scatter),
            other => Err(AnalysisError::UnknownChartKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// One point of a scatter series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// The data series of a chart payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSeries {
    /// Labeled frequency counts (bar charts).
    Bars {
        labels: Vec<String>,
        values: Vec<usize>,
    },
    /// Row-aligned numeric pairs (scatter charts).
    Points { points: Vec<ScatterPoint> },
}

/// Axis-label rendering hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisHints {
    pub x_label: String,
    pub y_label: String,
}

/// A complete, renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub kind: ChartKind,
    pub title: String,
    pub series: ChartSeries,
    pub hints: AxisHints,
}

/// Builds a bar-chart payload from the histogram of one numeric column.
///
/// Uses the chart binning context (at most 10 bins, 1-decimal labels).
/// A column with no numeric-coercible values has no safe bar shape, so
/// it is an error rather than an empty payload.
pub fn bar_chart(dataset: &Dataset, column: &str) -> Result<ChartPayload, AnalysisError> {
    let cells = dataset
        .column(column)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: column.to_string(),
        })?;

    let values: Vec<f64> = cells.iter().filter_map(CellValue::as_number).collect();
    if values.is_empty() {
        return Err(AnalysisError::NoNumericData {
            column: column.to_string(),
        });
    }

    let histogram = bin_values(&values, BinSpec::chart());
    let (labels, counts): (Vec<String>, Vec<usize>) = histogram
        .bins
        .into_iter()
        .map(|bin| (bin.label, bin.count))
        .unzip();

    Ok(ChartPayload {
        kind: ChartKind::Bar,
        title: format!("Distribution of {column}"),
        series: ChartSeries::Bars {
            labels,
            values: counts,
        },
        hints: AxisHints {
            x_label: column.to_string(),
            y_label: "frequency".to_string(),
        },
    })
}

/// Builds a scatter payload of two columns' shared-row numeric pairs.
///
/// Rows where either cell fails numeric coercion are dropped from both
/// sides, so points never misalign across columns.
pub fn scatter_chart(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
) -> Result<ChartPayload, AnalysisError> {
    let x_cells = dataset
        .column(x_column)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: x_column.to_string(),
        })?;
    let y_cells = dataset
        .column(y_column)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: y_column.to_string(),
        })?;

    let (xs, ys) = paired_numeric(x_cells, y_cells);
    let points = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| ScatterPoint { x, y })
        .collect();

    Ok(ChartPayload {
        kind: ChartKind::Scatter,
        title: format!("{y_column} vs {x_column}"),
        series: ChartSeries::Points { points },
        hints: AxisHints {
            x_label: x_column.to_string(),
            y_label: y_column.to_string(),
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────
