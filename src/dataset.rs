//! Column-major dataset of raw cell values.
//!
//! Unlike a typed DataFrame, a [`Dataset`] stores every cell as a raw
//! [`CellValue`] — column types are inferred per analysis call, never at
//! construction. The engine treats a dataset as a read-only snapshot:
//! every entry point takes `&Dataset` and nothing mutates it.
//!
//! # Example
//!
//! ```
//! use datasense::dataset::Dataset;
//! use datasense::value::CellValue;
//!
//! let rows = vec![
//!     vec![("age".to_string(), CellValue::from_raw("25")),
//!          ("city".to_string(), CellValue::from_raw("NYC"))],
//!     vec![("age".to_string(), CellValue::from_raw("30")),
//!          ("city".to_string(), CellValue::from_raw("LA"))],
//! ];
//! let ds = Dataset::from_rows(rows);
//! assert_eq!(ds.row_count(), 2);
//! assert_eq!(ds.column_names(), &["age", "city"]);
//! ```

use std::collections::HashMap;

use crate::error::AnalysisError;
use crate::value::CellValue;

/// One row: an ordered sequence of `(column name, cell)` pairs.
pub type Row = Vec<(String, CellValue)>;

/// Column-major tabular store of raw cells.
///
/// All columns have the same length. Column order is the order columns
/// were added (or the key order of the first row in [`from_rows`](Dataset::from_rows)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<CellValue>>,
    row_count: usize,
}

impl Dataset {
    /// Creates an empty dataset with no columns or rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from ordered rows.
    ///
    /// The first row fixes the column set and order. Keys absent from a
    /// later row become `Missing`; keys not present in the first row are
    /// ignored.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let Some(first) = rows.first() else {
            return Self::new();
        };
        let names: Vec<String> = first.iter().map(|(name, _)| name.clone()).collect();
        let row_count = rows.len();
        let mut columns: Vec<Vec<CellValue>> = names
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for row in rows {
            let mut by_name: HashMap<String, CellValue> = row.into_iter().collect();
            for (idx, name) in names.iter().enumerate() {
                columns[idx].push(by_name.remove(name).unwrap_or(CellValue::Missing));
            }
        }

        Self {
            names,
            columns,
            row_count,
        }
    }

    /// Adds a named column.
    ///
    /// Returns [`AnalysisError::DimensionMismatch`] if the column length
    /// doesn't match the existing row count (unless this is the first
    /// column).
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<CellValue>,
    ) -> Result<(), AnalysisError> {
        if self.columns.is_empty() {
            self.row_count = cells.len();
        } else if cells.len() != self.row_count {
            return Err(AnalysisError::DimensionMismatch {
                expected: self.row_count,
                actual: cells.len(),
            });
        }
        self.names.push(name.into());
        self.columns.push(cells);
        Ok(())
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the dataset has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns column names in column order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the cells of the column with the given `name`.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.column_index(name).map(|i| self.columns[i].as_slice())
    }

    /// Returns the cells of the column at `index`.
    pub fn column_at(&self, index: usize) -> Option<&[CellValue]> {
        self.columns.get(index).map(|c| c.as_slice())
    }

    /// Returns the index of the column with the given `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns an iterator over `(name, cells)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.names
            .iter()
            .map(|s| s.as_str())
            .zip(self.columns.iter().map(|c| c.as_slice()))
    }
}

/// Extracts row-aligned numeric pairs from two columns.
///
/// A row contributes only when BOTH cells coerce to numeric at the same
/// row index; rows missing or non-numeric on either side are dropped
/// from both outputs, so the returned sequences are always equal in
/// length and index-aligned.
pub fn paired_numeric(x: &[CellValue], y: &[CellValue]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (cx, cy) in x.iter().zip(y.iter()) {
        if let (Some(vx), Some(vy)) = (cx.as_number(), cy.as_number()) {
            xs.push(vx);
            ys.push(vy);
        }
    }
    (xs, ys)
}

// ── Tests ─────────────────────────────────────────────────────────────
