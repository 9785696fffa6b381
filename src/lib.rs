//! # datasense
//!
//! Tabular statistical analysis engine for visualization and reporting.
//!
//! datasense ingests loosely-typed tabular data — rows of named fields
//! whose values arrive as text — and produces descriptive and relational
//! statistics as structured, chart-ready results. Cells stay raw until
//! an analysis runs: column types are inferred per call by majority
//! vote, and values that fail coercion are silently excluded from
//! numeric aggregates rather than aborting the computation.
//!
//! ## Modules
//!
//! - [`value`] — Raw cell values and best-effort coercion (numeric, boolean-like, date-like)
//! - [`dataset`] — Column-major dataset of raw cells; row-aligned pair extraction
//! - [`inference`] — Majority-vote column type classification
//! - [`stats`] — Descriptive statistics (mean, median, mode, quartiles, spread)
//! - [`profiling`] — Column-level and dataset-level profiles
//! - [`correlation`] — Pairwise Pearson correlation matrix
//! - [`regression`] — Single-predictor ordinary least squares
//! - [`histogram`] — Equal-width distribution binning
//! - [`chart`] — Renderer-agnostic chart payloads (bar, scatter)
//! - [`analysis`] — Orchestration facade with timing/timestamp metadata
//! - [`csv_parser`] — CSV ingestion into raw datasets
//! - [`error`] — Error types
//!
//! ## Quick Start
//!
//! ```
//! use datasense::analysis::{self, AnalysisKind};
//! use datasense::csv_parser::CsvParser;
//! use datasense::inference::ColumnType;
//!
//! let csv = "age,city\n25,NYC\n30,LA\n35,NYC\n";
//! let ds = CsvParser::new().parse_str(csv).unwrap();
//!
//! let result = analysis::basic_stats(&ds);
//! assert_eq!(result.kind, AnalysisKind::BasicStats);
//!
//! let profile = datasense::profiling::profile_dataset(&ds);
//! assert_eq!(profile.columns[0].column_type, ColumnType::Numeric);
//! assert_eq!(profile.columns[1].unique_count, 2);
//! ```

pub mod analysis;
pub mod chart;
pub mod correlation;
pub mod csv_parser;
pub mod dataset;
pub mod error;
pub mod histogram;
pub mod inference;
pub mod profiling;
pub mod regression;
pub mod stats;
pub mod value;
