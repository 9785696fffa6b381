//! Cell values and best-effort coercion.
//!
//! A cell is a closed variant: [`Number`](CellValue::Number),
//! [`Text`](CellValue::Text), or [`Missing`](CellValue::Missing). All
//! type-sniffing lives here — downstream components only ever see typed
//! numeric sequences or canonical strings.
//!
//! Coercion never fails loudly. A value that doesn't parse as a number
//! simply isn't numeric; the three likeness checks (numeric,
//! boolean-like, date-like) are independent and a value may satisfy
//! several. Which one wins is decided per column, in
//! [`inference`](crate::inference).
//!
//! # Example
//!
//! ```
//! use datasense::value::CellValue;
//!
//! let cell = CellValue::from_raw("  42.5 ");
//! assert_eq!(cell.as_number(), Some(42.5));
//!
//! // Thousands separators are not stripped.
//! assert_eq!(CellValue::from_raw("1,000").as_number(), None);
//!
//! // Empty strings are missing.
//! assert!(CellValue::from_raw("").is_missing());
//! ```

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Tokens treated as boolean-like, compared case-insensitively.
const BOOLEAN_TOKENS: &[&str] = &["true", "false", "yes", "no", "1", "0"];

/// Date formats accepted by the date-likeness check, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Loose ISO-style date prefix: `YYYY-M-D` with anything after.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}").expect("valid date prefix pattern"));

/// A single raw cell value.
///
/// Serializes untagged: a bare number, a bare string, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A finite numeric value.
    Number(f64),
    /// Raw text as supplied by the caller.
    Text(String),
    /// Null, absent, or empty-string cell.
    Missing,
}

impl CellValue {
    /// Creates a numeric cell. Non-finite input degrades to `Missing`.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(value)
        } else {
            Self::Missing
        }
    }

    /// Creates a cell from a raw textual field.
    ///
    /// An empty string maps to `Missing`; anything else (including
    /// whitespace-only strings) is kept as `Text` verbatim.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// Returns `true` if the cell is missing.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Attempts numeric coercion.
    ///
    /// Text is trimmed and parsed as a decimal; values that don't yield
    /// a finite number (including `"inf"`/`"nan"` spellings) are not
    /// numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Missing => None,
        }
    }

    /// Returns `true` if the cell coerces to a finite number.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns `true` if the canonical form is a boolean token
    /// (`true`/`false`/`yes`/`no`/`1`/`0`, case-insensitive).
    pub fn is_boolean_like(&self) -> bool {
        match self.canonical() {
            Some(s) => {
                let lowered = s.to_ascii_lowercase();
                BOOLEAN_TOKENS.contains(&lowered.as_str())
            }
            None => false,
        }
    }

    /// Returns `true` if the cell looks like a calendar date.
    ///
    /// A text cell is date-like when its trimmed form matches the loose
    /// `YYYY-M-D` prefix, parses under one of the pinned [`DATE_FORMATS`],
    /// or parses as RFC 3339. Numbers are never date-like.
    pub fn is_date_like(&self) -> bool {
        let Self::Text(s) = self else {
            return false;
        };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return false;
        }
        if DATE_PREFIX.is_match(trimmed) {
            return true;
        }
        if DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        {
            return true;
        }
        DateTime::parse_from_rfc3339(trimmed).is_ok()
    }

    /// Canonical string form used for equality (uniqueness, mode keys).
    ///
    /// Text is trimmed; numbers use their shortest decimal form, so
    /// `Number(25.0)` and `Text("25")` are the same observation.
    /// Missing cells have no canonical form.
    pub fn canonical(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::Text(s) => Some(Cow::Borrowed(s.trim())),
            Self::Missing => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_raw(value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
