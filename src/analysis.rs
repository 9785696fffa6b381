//! Analysis orchestration.
//!
//! The facade ties the engine together: given a dataset and an
//! [`AnalysisRequest`], it invokes the matching component, wraps the
//! result with a human-readable title and description, and stamps it
//! with execution time and a completion timestamp. Every analysis is a
//! pure function of `(dataset, parameters)` — stateless, idempotent up
//! to metadata, and never mutating its input.
//!
//! # Example
//!
//! ```
//! use datasense::analysis::{self, AnalysisKind};
//! use datasense::csv_parser::CsvParser;
//!
//! let csv = "age,score\n25,88\n30,92\n35,79\n";
//! let ds = CsvParser::new().parse_str(csv).unwrap();
//!
//! let result = analysis::basic_stats(&ds);
//! assert_eq!(result.kind, AnalysisKind::BasicStats);
//!
//! let result = analysis::distribution(&ds, "score").unwrap();
//! assert_eq!(result.kind, AnalysisKind::Distribution);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::chart::{bar_chart, scatter_chart, ChartKind, ChartPayload};
use crate::correlation::{correlation_matrix, CorrelationOutcome};
use crate::dataset::{paired_numeric, Dataset};
use crate::error::AnalysisError;
use crate::histogram::{bin_values, BinSpec, Histogram};
use crate::profiling::{profile_dataset, DatasetProfile};
use crate::regression::{fit_line, RegressionFit};
use crate::value::CellValue;

/// The analyses the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    /// Full dataset profile: types, counts, descriptive statistics.
    #[default]
    BasicStats,
    /// Pairwise Pearson correlation across numeric columns.
    Correlation,
    /// Histogram distribution of one numeric column.
    Distribution,
    /// Renderer-agnostic chart payload.
    Chart,
    /// Single-predictor least-squares fit.
    Regression,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BasicStats => "basic-stats",
            Self::Correlation => "correlation",
            Self::Distribution => "distribution",
            Self::Chart => "chart",
            Self::Regression => "regression",
        };
        write!(f, "{name}")
    }
}

impl FromStr for AnalysisKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic-stats" => Ok(Self::BasicStats),
            "correlation" => Ok(Self::Correlation),
            "distribution" => Ok(Self::Distribution),
            "chart" => Ok(Self::Chart),
            "regression" => Ok(Self::Regression),
            other => Err(AnalysisError::UnknownAnalysisKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Parameters for one analysis run.
///
/// Which fields are required depends on the kind: `column` for
/// distribution and bar charts, `x_column`/`y_column` for scatter
/// charts and regression, `chart_kind` for charts. The basic-stats
/// `column` filter is accepted but not honored — the full dataset
/// profile is always produced (known gap, kept for compatibility).
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub kind: AnalysisKind,
    pub column: Option<String>,
    pub chart_kind: Option<ChartKind>,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
}

impl AnalysisRequest {
    /// Creates a request with only the kind set.
    pub fn new(kind: AnalysisKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// Distribution analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DistributionData {
    /// The binned histogram of a column's numeric values.
    Histogram {
        column: String,
        value_count: usize,
        histogram: Histogram,
    },
    /// The column had no numeric-coercible values.
    Empty { column: String, message: String },
}

/// Regression analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegressionOutcome {
    Fit {
        x_column: String,
        y_column: String,
        fit: RegressionFit,
    },
    /// Too few shared numeric rows, or a zero-variance predictor.
    Unavailable { message: String },
}

/// The payload of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisData {
    Profile(DatasetProfile),
    Correlation(CorrelationOutcome),
    Distribution(DistributionData),
    Chart(ChartPayload),
    Regression(RegressionOutcome),
}

/// Execution metadata stamped on every result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisMetadata {
    /// Wall-clock duration of the computation, in milliseconds.
    pub execution_time_ms: f64,
    /// Completion timestamp (UTC, RFC 3339).
    pub completed_at: DateTime<Utc>,
}

/// A complete analysis result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    pub title: String,
    pub description: String,
    pub data: AnalysisData,
    pub metadata: AnalysisMetadata,
}

/// Runs the analysis described by `request` against `dataset`.
///
/// Contract violations (unknown columns, missing parameters, unknown
/// chart kinds) return `Err`. Data-quality shortfalls (too few numeric
/// columns, empty columns, degenerate fits) return `Ok` with an
/// explanatory payload — except chart generation, which has no safe
/// default shape and errors instead.
pub fn run(dataset: &Dataset, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
    let started = Instant::now();

    let (title, description, data) = match request.kind {
        AnalysisKind::BasicStats => {
            let profile = profile_dataset(dataset);
            (
                "Basic Statistics".to_string(),
                "Column types, counts, and descriptive statistics".to_string(),
                AnalysisData::Profile(profile),
            )
        }
        AnalysisKind::Correlation => {
            let outcome = correlation_matrix(dataset);
            (
                "Correlation Analysis".to_string(),
                "Pairwise Pearson correlation across numeric columns".to_string(),
                AnalysisData::Correlation(outcome),
            )
        }
        AnalysisKind::Distribution => {
            let column = require(request.column.as_deref(), "column")?;
            let data = distribution_data(dataset, column)?;
            (
                "Distribution Analysis".to_string(),
                format!("Histogram distribution of '{column}'"),
                AnalysisData::Distribution(data),
            )
        }
        AnalysisKind::Chart => {
            let kind = request
                .chart_kind
                .ok_or(AnalysisError::MissingParameter { name: "chart_kind" })?;
            let payload = match kind {
                ChartKind::Bar => {
                    let column = require(request.column.as_deref(), "column")?;
                    bar_chart(dataset, column)?
                }
                ChartKind::Scatter => {
                    let x = require(request.x_column.as_deref(), "x_column")?;
                    let y = require(request.y_column.as_deref(), "y_column")?;
                    scatter_chart(dataset, x, y)?
                }
            };
            (
                "Chart Data".to_string(),
                payload.title.clone(),
                AnalysisData::Chart(payload),
            )
        }
        AnalysisKind::Regression => {
            let x = require(request.x_column.as_deref(), "x_column")?;
            let y = require(request.y_column.as_deref(), "y_column")?;
            let outcome = regression_outcome(dataset, x, y)?;
            (
                "Linear Regression".to_string(),
                format!("Ordinary least squares fit of '{y}' on '{x}'"),
                AnalysisData::Regression(outcome),
            )
        }
    };

    let execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(
        kind = %request.kind,
        rows = dataset.row_count(),
        elapsed_ms = execution_time_ms,
        "analysis complete"
    );

    Ok(AnalysisResult {
        kind: request.kind,
        title,
        description,
        data,
        metadata: AnalysisMetadata {
            execution_time_ms,
            completed_at: Utc::now(),
        },
    })
}

/// Full dataset profile (the basic-stats analysis).
pub fn basic_stats(dataset: &Dataset) -> AnalysisResult {
    run(dataset, &AnalysisRequest::new(AnalysisKind::BasicStats))
        .expect("basic-stats takes no parameters")
}

/// Pairwise correlation analysis.
pub fn correlation(dataset: &Dataset) -> AnalysisResult {
    run(dataset, &AnalysisRequest::new(AnalysisKind::Correlation))
        .expect("correlation takes no parameters")
}

/// Histogram distribution of one column.
pub fn distribution(dataset: &Dataset, column: &str) -> Result<AnalysisResult, AnalysisError> {
    let request = AnalysisRequest {
        column: Some(column.to_string()),
        ..AnalysisRequest::new(AnalysisKind::Distribution)
    };
    run(dataset, &request)
}

/// Bar-chart payload for one numeric column.
pub fn bar_chart_analysis(
    dataset: &Dataset,
    column: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let request = AnalysisRequest {
        chart_kind: Some(ChartKind::Bar),
        column: Some(column.to_string()),
        ..AnalysisRequest::new(AnalysisKind::Chart)
    };
    run(dataset, &request)
}

/// Scatter-chart payload for two numeric columns.
pub fn scatter_chart_analysis(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let request = AnalysisRequest {
        chart_kind: Some(ChartKind::Scatter),
        x_column: Some(x_column.to_string()),
        y_column: Some(y_column.to_string()),
        ..AnalysisRequest::new(AnalysisKind::Chart)
    };
    run(dataset, &request)
}

/// Single-predictor regression of `y_column` on `x_column`.
pub fn regression(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let request = AnalysisRequest {
        x_column: Some(x_column.to_string()),
        y_column: Some(y_column.to_string()),
        ..AnalysisRequest::new(AnalysisKind::Regression)
    };
    run(dataset, &request)
}

// ── Internal helpers ──────────────────────────────────────────────────

fn require<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, AnalysisError> {
    value.ok_or(AnalysisError::MissingParameter { name })
}

fn distribution_data(
    dataset: &Dataset,
    column: &str,
) -> Result<DistributionData, AnalysisError> {
    let cells = dataset
        .column(column)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: column.to_string(),
        })?;

    let values: Vec<f64> = cells.iter().filter_map(CellValue::as_number).collect();
    if values.is_empty() {
        return Ok(DistributionData::Empty {
            column: column.to_string(),
            message: format!("column '{column}' has no numeric values to bin"),
        });
    }

    let histogram = bin_values(&values, BinSpec::distribution());
    Ok(DistributionData::Histogram {
        column: column.to_string(),
        value_count: values.len(),
        histogram,
    })
}

fn regression_outcome(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
) -> Result<RegressionOutcome, AnalysisError> {
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
    Ok(match fit_line(&xs, &ys) {
        Some(fit) => RegressionOutcome::Fit {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            fit,
        },
        None => RegressionOutcome::Unavailable {
            message: format!(
                "regression of '{y_column}' on '{x_column}' needs at least 2 shared numeric rows \
                 and a non-constant predictor"
            ),
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::CorrelationOutcome;

    fn raw(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from_raw(v)).collect()
    }

    fn sample_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.add_column("x", raw(&["1", "2", "3", "4", "5"])).unwrap();
        ds.add_column("y", raw(&["2", "4", "6", "8", "10"])).unwrap();
        ds.add_column("city", raw(&["NYC", "LA", "NYC", "SF", "LA"]))
            .unwrap();
        ds
    }

    #[test]
    fn basic_stats_profiles_every_column() {
        let result = basic_stats(&sample_dataset());
        assert_eq!(result.kind, AnalysisKind::BasicStats);
        let AnalysisData::Profile(profile) = &result.data else {
            panic!("expected profile data");
        };
        assert_eq!(profile.total_columns, 3);
        assert_eq!(profile.total_rows, 5);
    }

    #[test]
    fn correlation_finds_perfect_pair() {
        let result = correlation(&sample_dataset());
        let AnalysisData::Correlation(CorrelationOutcome::Matrix(m)) = &result.data else {
            panic!("expected correlation matrix");
        };
        assert_eq!(m.get("x", "y"), Some(1.0));
    }

    #[test]
    fn correlation_with_one_numeric_column_is_ok_not_err() {
        let mut ds = Dataset::new();
        ds.add_column("x", raw(&["1", "2", "3"])).unwrap();
        ds.add_column("city", raw(&["NYC", "LA", "SF"])).unwrap();
        let result = correlation(&ds);
        assert!(matches!(
            result.data,
            AnalysisData::Correlation(CorrelationOutcome::Insufficient { .. })
        ));
    }

    #[test]
    fn distribution_requires_column_parameter() {
        let request = AnalysisRequest::new(AnalysisKind::Distribution);
        let err = run(&sample_dataset(), &request).unwrap_err();
        assert_eq!(err, AnalysisError::MissingParameter { name: "column" });
    }

    #[test]
    fn distribution_of_unknown_column_errors() {
        let err = distribution(&sample_dataset(), "nope").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColumnNotFound {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn distribution_of_text_column_is_message_payload() {
        let result = distribution(&sample_dataset(), "city").unwrap();
        assert!(matches!(
            result.data,
            AnalysisData::Distribution(DistributionData::Empty { .. })
        ));
    }

    #[test]
    fn distribution_of_constant_column_uses_single_bin() {
        let mut ds = Dataset::new();
        ds.add_column("k", raw(&["5", "5", "5", "5"])).unwrap();
        let result = distribution(&ds, "k").unwrap();
        let AnalysisData::Distribution(DistributionData::Histogram { histogram, .. }) =
            &result.data
        else {
            panic!("expected histogram data");
        };
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].count, 4);
    }

    #[test]
    fn chart_requires_kind_and_columns() {
        let ds = sample_dataset();
        let request = AnalysisRequest::new(AnalysisKind::Chart);
        assert_eq!(
            run(&ds, &request).unwrap_err(),
            AnalysisError::MissingParameter { name: "chart_kind" }
        );

        let request = AnalysisRequest {
            chart_kind: Some(ChartKind::Scatter),
            ..AnalysisRequest::new(AnalysisKind::Chart)
        };
        assert_eq!(
            run(&ds, &request).unwrap_err(),
            AnalysisError::MissingParameter { name: "x_column" }
        );
    }

    #[test]
    fn chart_analyses_end_to_end() {
        let ds = sample_dataset();
        let result = scatter_chart_analysis(&ds, "x", "y").unwrap();
        assert_eq!(result.kind, AnalysisKind::Chart);
        assert!(matches!(result.data, AnalysisData::Chart(_)));

        let result = bar_chart_analysis(&ds, "x").unwrap();
        assert_eq!(result.title, "Chart Data");
        assert!(matches!(result.data, AnalysisData::Chart(_)));
    }

    #[test]
    fn regression_recovers_slope_and_intercept() {
        let result = regression(&sample_dataset(), "x", "y").unwrap();
        let AnalysisData::Regression(RegressionOutcome::Fit { fit, .. }) = &result.data else {
            panic!("expected regression fit");
        };
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn regression_on_text_column_is_unavailable_payload() {
        let result = regression(&sample_dataset(), "x", "city").unwrap();
        assert!(matches!(
            result.data,
            AnalysisData::Regression(RegressionOutcome::Unavailable { .. })
        ));
    }

    #[test]
    fn analysis_kind_round_trips_through_strings() {
        for kind in [
            AnalysisKind::BasicStats,
            AnalysisKind::Correlation,
            AnalysisKind::Distribution,
            AnalysisKind::Chart,
            AnalysisKind::Regression,
        ] {
            assert_eq!(kind.to_string().parse::<AnalysisKind>().unwrap(), kind);
        }
        assert!(matches!(
            "clustering".parse::<AnalysisKind>(),
            Err(AnalysisError::UnknownAnalysisKind { .. })
        ));
    }

    #[test]
    fn results_are_idempotent_up_to_metadata() {
        let ds = sample_dataset();
        let a = basic_stats(&ds);
        let b = basic_stats(&ds);
        assert_eq!(
            serde_json::to_value(&a.data).unwrap(),
            serde_json::to_value(&b.data).unwrap()
        );

        let a = correlation(&ds);
        let b = correlation(&ds);
        assert_eq!(
            serde_json::to_value(&a.data).unwrap(),
            serde_json::to_value(&b.data).unwrap()
        );
    }

    #[test]
    fn engine_does_not_mutate_the_dataset() {
        let ds = sample_dataset();
        let before = ds.clone();
        let _ = basic_stats(&ds);
        let _ = correlation(&ds);
        let _ = distribution(&ds, "x").unwrap();
        assert_eq!(ds, before);
    }

    #[test]
    fn metadata_is_stamped() {
        let result = basic_stats(&sample_dataset());
        assert!(result.metadata.execution_time_ms >= 0.0);
        // RFC 3339 rendering contains the date/time separator.
        assert!(result.metadata.completed_at.to_rfc3339().contains('T'));
    }
}
