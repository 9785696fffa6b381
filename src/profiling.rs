//! Column-level and dataset-level profiling.
//!
//! Profiling tolerates dirty data: missing values are expected input,
//! not errors. Each column gets an inferred type, null/unique counts,
//! the first few distinct values, and — for numeric columns —
//! descriptive statistics over its numeric-coercible cells.
//!
//! # Example
//!
//! ```
//! use datasense::csv_parser::CsvParser;
//! use datasense::inference::ColumnType;
//! use datasense::profiling::profile_dataset;
//!
//! let csv = "age,city\n25,NYC\n30,LA\n35,NYC\n";
//! let ds = CsvParser::new().parse_str(csv).unwrap();
//! let profile = profile_dataset(&ds);
//!
//! assert_eq!(profile.total_rows, 3);
//! assert_eq!(profile.columns[0].column_type, ColumnType::Numeric);
//! assert_eq!(profile.columns[1].unique_count, 2);
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::inference::{infer_column_type, ColumnType};
use crate::stats::{summarize, StatisticalSummary};
use crate::value::CellValue;

/// How many distinct values to keep as a preview of the column.
const SAMPLE_VALUE_LIMIT: usize = 5;

/// Complete profile for a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Inferred type (recomputed per call, never cached).
    pub column_type: ColumnType,
    /// Number of missing cells.
    pub null_count: usize,
    /// Number of distinct non-missing values, by canonical form.
    pub unique_count: usize,
    /// First 5 distinct non-missing values in first-seen order.
    pub sample_values: Vec<CellValue>,
    /// Descriptive statistics; present only for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticalSummary>,
}

/// Profile of an entire dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Per-column profiles, in dataset column order.
    pub columns: Vec<ColumnProfile>,
}

/// Profiles a single column.
pub fn profile_column(name: &str, cells: &[CellValue]) -> ColumnProfile {
    let column_type = infer_column_type(cells);
    let null_count = cells.iter().filter(|c| c.is_missing()).count();

    let mut seen: HashSet<String> = HashSet::new();
    let mut sample_values: Vec<CellValue> = Vec::new();
    for cell in cells {
        let Some(key) = cell.canonical() else {
            continue;
        };
        if seen.insert(key.into_owned()) && sample_values.len() < SAMPLE_VALUE_LIMIT {
            sample_values.push(cell.clone());
        }
    }
    let unique_count = seen.len();

    let statistics = if column_type == ColumnType::Numeric {
        Some(summarize(cells))
    } else {
        None
    };

    ColumnProfile {
        name: name.to_string(),
        column_type,
        null_count,
        unique_count,
        sample_values,
        statistics,
    }
}

/// Profiles every column of a dataset, in column order.
pub fn profile_dataset(dataset: &Dataset) -> DatasetProfile {
    let columns: Vec<ColumnProfile> = dataset
        .iter()
        .map(|(name, cells)| profile_column(name, cells))
        .collect();

    debug!(
        rows = dataset.row_count(),
        columns = columns.len(),
        "profiled dataset"
    );

    DatasetProfile {
        total_rows: dataset.row_count(),
        total_columns: dataset.column_count(),
        columns,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
