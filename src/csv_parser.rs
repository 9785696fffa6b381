//! CSV ingestion into a raw [`Dataset`].
//!
//! Parses CSV text into columns of raw [`CellValue`]s. Unlike a typed
//! loader, no type inference happens here: the engine re-infers column
//! types on every analysis call, so cells stay as text (or `Missing`
//! for null markers) until an analysis coerces them.
//!
//! # Features
//!
//! - RFC 4180 field handling: quoted fields, escaped quotes, commas and
//!   newlines inside quotes
//! - CRLF and bare-CR line endings, BOM stripping
//! - Standard null markers recognized: empty, `NA`, `N/A`, `null`,
//!   `NULL`, `NaN`
//! - Configurable delimiter, header presence, and null markers
//!
//! # Example
//!
//! ```
//! use datasense::csv_parser::CsvParser;
//!
//! let csv = "name,score\nAlice,90\nBob,85\n";
//! let ds = CsvParser::new().parse_str(csv).unwrap();
//! assert_eq!(ds.row_count(), 2);
//! assert_eq!(ds.column_names(), &["name", "score"]);
//! ```

use crate::dataset::Dataset;
use crate::error::AnalysisError;
use crate::value::CellValue;

/// Null markers recognized by default, compared after trimming.
const DEFAULT_NULL_MARKERS: &[&str] =
    &["", "NA", "N/A", "na", "n/a", "null", "NULL", "NaN", "nan"];

/// CSV parser configuration and entry point.
///
/// ```
/// use datasense::csv_parser::CsvParser;
///
/// let ds = CsvParser::new()
///     .delimiter(b';')
///     .parse_str("a;b\n1;2\n")
///     .unwrap();
/// assert_eq!(ds.column_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
    has_header: bool,
    null_markers: Vec<String>,
}

impl CsvParser {
    /// Creates a parser with default settings (comma delimiter, header
    /// row, standard null markers).
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            null_markers: DEFAULT_NULL_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first row is a header (default: true).
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Replaces the null markers.
    pub fn null_markers(mut self, markers: Vec<String>) -> Self {
        self.null_markers = markers;
        self
    }

    /// Parses CSV text into a raw dataset.
    pub fn parse_str(&self, input: &str) -> Result<Dataset, AnalysisError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let records = self.scan_records(input);

        let (headers, data_rows): (Vec<String>, &[Vec<String>]) = if self.has_header {
            match records.split_first() {
                Some((first, rest)) => (first.clone(), rest),
                None => return Ok(Dataset::new()),
            }
        } else {
            let width = records.first().map_or(0, Vec::len);
            ((0..width).map(|i| format!("col_{i}")).collect(), &records[..])
        };

        if headers.is_empty() {
            return Ok(Dataset::new());
        }

        let width = headers.len();
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(data_rows.len()); width];
        for (row_idx, record) in data_rows.iter().enumerate() {
            if record.len() != width {
                let line = row_idx + 1 + usize::from(self.has_header);
                return Err(AnalysisError::CsvParse {
                    line,
                    message: format!("expected {width} fields, got {}", record.len()),
                });
            }
            for (col_idx, field) in record.iter().enumerate() {
                columns[col_idx].push(self.to_cell(field));
            }
        }

        let mut dataset = Dataset::new();
        for (name, cells) in headers.into_iter().zip(columns) {
            dataset
                .add_column(name, cells)
                .expect("columns built row-by-row share one length");
        }
        Ok(dataset)
    }

    /// Parses a CSV file from disk.
    pub fn parse_file(&self, path: &str) -> Result<Dataset, AnalysisError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    // ── Internal ─────────────────────────────────────────────────

    fn to_cell(&self, field: &str) -> CellValue {
        if self.null_markers.iter().any(|m| m == field.trim()) {
            CellValue::Missing
        } else {
            CellValue::from_raw(field)
        }
    }

    /// Splits raw text into records of string fields, honoring quotes.
    fn scan_records(&self, input: &str) -> Vec<Vec<String>> {
        let delimiter = self.delimiter as char;
        let mut records: Vec<Vec<String>> = Vec::new();
        let mut record: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' if field.is_empty() => in_quotes = true,
                _ if in_quotes => field.push(c),
                _ if c == delimiter => record.push(std::mem::take(&mut field)),
                '\r' => {
                    // CRLF is handled by the upcoming '\n'; a bare CR
                    // (old Mac style) terminates the record itself.
                    if chars.peek() != Some(&'\n') {
                        record.push(std::mem::take(&mut field));
                        records.push(std::mem::take(&mut record));
                    }
                }
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
        if !field.is_empty() || !record.is_empty() {
            record.push(field);
            records.push(record);
        }

        // Trailing blank lines are not rows.
        while records
            .last()
            .is_some_and(|r| r.iter().all(String::is_empty))
        {
            records.pop();
        }
        records
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_csv() {
        let ds = CsvParser::new().parse_str("a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.column_names(), &["a", "b", "c"]);
    }

    #[test]
    fn cells_stay_raw() {
        let ds = CsvParser::new().parse_str("x\n1.5\nhello\n").unwrap();
        let cells = ds.column("x").unwrap();
        assert_eq!(cells[0], CellValue::from_raw("1.5"));
        assert_eq!(cells[1], CellValue::from_raw("hello"));
    }

    #[test]
    fn null_markers_become_missing() {
        let ds = CsvParser::new()
            .parse_str("x\n1.0\nNA\n3.0\nnull\nNaN\n")
            .unwrap();
        let cells = ds.column("x").unwrap();
        let missing = cells.iter().filter(|c| c.is_missing()).count();
        assert_eq!(missing, 3);
        assert!(!cells[0].is_missing());
    }

    #[test]
    fn empty_fields_are_missing() {
        let ds = CsvParser::new().parse_str("a,b\n1,\n,2\n").unwrap();
        assert!(ds.column("b").unwrap()[0].is_missing());
        assert!(ds.column("a").unwrap()[1].is_missing());
    }

    #[test]
    fn custom_null_markers() {
        let ds = CsvParser::new()
            .null_markers(vec!["-999".to_string()])
            .parse_str("x\n1.0\n-999\n3.0\n")
            .unwrap();
        let cells = ds.column("x").unwrap();
        assert!(cells[1].is_missing());
        // Defaults were replaced: "NA" is now a plain value.
        let ds = CsvParser::new()
            .null_markers(vec!["-999".to_string()])
            .parse_str("x\nNA\n")
            .unwrap();
        assert!(!ds.column("x").unwrap()[0].is_missing());
    }

    // ── Quoted fields ────────────────────────────────────────────

    #[test]
    fn quoted_fields_keep_delimiters_and_escapes() {
        let csv = "name,desc\nAlice,\"hello, world\"\nBob,\"she said \"\"hi\"\"\"\n";
        let ds = CsvParser::new().parse_str(csv).unwrap();
        let desc = ds.column("desc").unwrap();
        assert_eq!(desc[0], CellValue::from_raw("hello, world"));
        assert_eq!(desc[1], CellValue::from_raw("she said \"hi\""));
    }

    #[test]
    fn quoted_fields_keep_newlines() {
        let csv = "name,note\nAlice,\"line1\nline2\"\nBob,simple\n";
        let ds = CsvParser::new().parse_str(csv).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(
            ds.column("note").unwrap()[0],
            CellValue::from_raw("line1\nline2")
        );
    }

    // ── Line endings and structure ───────────────────────────────

    #[test]
    fn crlf_line_endings() {
        let ds = CsvParser::new().parse_str("a,b\r\n1,2\r\n3,4\r\n").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("a").unwrap()[1], CellValue::from_raw("3"));
    }

    #[test]
    fn bare_cr_line_endings() {
        let ds = CsvParser::new().parse_str("a,b\r1,2\r3,4").unwrap();
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn no_trailing_newline() {
        let ds = CsvParser::new().parse_str("x\n1\n2\n3").unwrap();
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    fn bom_is_stripped() {
        let ds = CsvParser::new().parse_str("\u{feff}x,y\n1,2\n").unwrap();
        assert_eq!(ds.column_names(), &["x", "y"]);
    }

    #[test]
    fn empty_input() {
        let ds = CsvParser::new().parse_str("").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 0);
    }

    #[test]
    fn header_only() {
        let ds = CsvParser::new().parse_str("a,b,c\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 3);
    }

    #[test]
    fn ragged_row_is_an_error() {
        let result = CsvParser::new().parse_str("a,b\n1,2\n3\n");
        assert_eq!(
            result,
            Err(AnalysisError::CsvParse {
                line: 3,
                message: "expected 2 fields, got 1".to_string()
            })
        );
    }

    #[test]
    fn without_header_columns_are_numbered() {
        let ds = CsvParser::new()
            .has_header(false)
            .parse_str("1,2\n3,4\n")
            .unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column_names(), &["col_0", "col_1"]);
    }

    #[test]
    fn tab_delimiter() {
        let ds = CsvParser::new()
            .delimiter(b'\t')
            .parse_str("a\tb\n1\t2\n")
            .unwrap();
        assert_eq!(ds.column_names(), &["a", "b"]);
    }
}
