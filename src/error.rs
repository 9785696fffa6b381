//! Error types for datasense.

use thiserror::Error;

/// All errors produced by datasense operations.
///
/// Expected data-quality issues (missing cells, non-numeric values,
/// degenerate ranges) are not errors — components exclude or fall back
/// silently. An `AnalysisError` means the caller violated the input
/// contract: an unknown column, a malformed request, or ragged CSV.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// CSV parsing failed.
    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },
    /// Column not found in the dataset.
    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },
    /// A required request parameter was not supplied.
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: &'static str },
    /// Requested chart kind is not supported.
    #[error("unknown chart kind '{kind}'")]
    UnknownChartKind { kind: String },
    /// Requested analysis kind is not supported.
    #[error("unknown analysis kind '{kind}'")]
    UnknownAnalysisKind { kind: String },
    /// Column has no numeric-coercible values where a chart requires them.
    #[error("column '{column}' has no numeric data")]
    NoNumericData { column: String },
    /// Column length does not match the dataset row count.
    #[error("expected {expected} rows, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
