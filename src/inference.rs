//! Column type inference.
//!
//! A column's type is decided by majority vote over its non-missing
//! cells: each cell is tested independently for numeric, date, and
//! boolean likeness (a cell may count toward several), and the fractions
//! decide the column type. Majority-vote classification tolerates noisy
//! cells without requiring a schema.
//!
//! Types are derived per call and never cached — permuting row order
//! cannot change the result.
//!
//! # Example
//!
//! ```
//! use datasense::inference::{infer_column_type, ColumnType};
//! use datasense::value::CellValue;
//!
//! let cells: Vec<CellValue> = ["25", "30", "abc"]
//!     .iter()
//!     .map(|v| CellValue::from_raw(v))
//!     .collect();
//! // 2 of 3 numeric = 0.67: above the 0.3 floor, below the 0.8 majority.
//! assert_eq!(infer_column_type(&cells), ColumnType::Mixed);
//! ```

use std::fmt;

use serde::Serialize;

use crate::value::CellValue;

/// Fraction of non-missing cells a likeness must reach to claim the column.
const MAJORITY_THRESHOLD: f64 = 0.8;

/// Fraction above which a partial likeness marks the column as mixed.
const MIXED_THRESHOLD: f64 = 0.3;

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Majority of cells coerce to finite numbers.
    Numeric,
    /// Free-form text, or no non-missing cells at all.
    #[serde(rename = "string")]
    Text,
    /// Majority of cells look like calendar dates.
    Date,
    /// Majority of cells are boolean tokens.
    Boolean,
    /// No majority, but a substantial minority of some likeness.
    Mixed,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Numeric => "numeric",
            Self::Text => "string",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Mixed => "mixed",
        };
        write!(f, "{name}")
    }
}

/// Infers the type of a column from its cells.
///
/// Classification rules, applied in order over non-missing cells:
/// 1. no non-missing cells → `Text`;
/// 2. numeric fraction > 0.8 → `Numeric`;
/// 3. date fraction > 0.8 → `Date`;
/// 4. boolean fraction > 0.8 → `Boolean`;
/// 5. any fraction > 0.3 → `Mixed`;
/// 6. otherwise → `Text`.
pub fn infer_column_type(cells: &[CellValue]) -> ColumnType {
    let mut total = 0usize;
    let mut numeric = 0usize;
    let mut date = 0usize;
    let mut boolean = 0usize;

    for cell in cells {
        if cell.is_missing() {
            continue;
        }
        total += 1;
        if cell.is_numeric() {
            numeric += 1;
        }
        if cell.is_date_like() {
            date += 1;
        }
        if cell.is_boolean_like() {
            boolean += 1;
        }
    }

    if total == 0 {
        return ColumnType::Text;
    }

    let n = total as f64;
    let numeric_frac = numeric as f64 / n;
    let date_frac = date as f64 / n;
    let boolean_frac = boolean as f64 / n;

    if numeric_frac > MAJORITY_THRESHOLD {
        ColumnType::Numeric
    } else if date_frac > MAJORITY_THRESHOLD {
        ColumnType::Date
    } else if boolean_frac > MAJORITY_THRESHOLD {
        ColumnType::Boolean
    } else if numeric_frac > MIXED_THRESHOLD
        || date_frac > MIXED_THRESHOLD
        || boolean_frac > MIXED_THRESHOLD
    {
        ColumnType::Mixed
    } else {
        ColumnType::Text
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from_raw(v)).collect()
    }

    #[test]
    fn all_numeric_is_numeric() {
        assert_eq!(
            infer_column_type(&raw(&["1", "2.5", "-3", "4e2", "0"])),
            ColumnType::Numeric
        );
    }

    #[test]
    fn two_thirds_numeric_is_mixed() {
        // 0.3 < 2/3 <= 0.8, so this is mixed, not numeric.
        assert_eq!(
            infer_column_type(&raw(&["25", "30", "abc"])),
            ColumnType::Mixed
        );
    }

    #[test]
    fn plain_text_is_string() {
        assert_eq!(
            infer_column_type(&raw(&["NYC", "LA", "NYC", "Chicago"])),
            ColumnType::Text
        );
    }

    #[test]
    fn dates_are_date() {
        assert_eq!(
            infer_column_type(&raw(&["2024-01-01", "2024-02-15", "2024-03-30"])),
            ColumnType::Date
        );
    }

    #[test]
    fn booleans_are_boolean() {
        assert_eq!(
            infer_column_type(&raw(&["yes", "no", "YES", "no", "no"])),
            ColumnType::Boolean
        );
    }

    #[test]
    fn ones_and_zeros_classify_as_numeric_first() {
        // "1"/"0" satisfy both checks; numeric wins by precedence.
        assert_eq!(
            infer_column_type(&raw(&["1", "0", "1", "1"])),
            ColumnType::Numeric
        );
    }

    #[test]
    fn empty_and_all_missing_are_string() {
        assert_eq!(infer_column_type(&[]), ColumnType::Text);
        assert_eq!(
            infer_column_type(&raw(&["", "", ""])),
            ColumnType::Text
        );
    }

    #[test]
    fn missing_cells_are_excluded_from_fractions() {
        // 3 of 3 non-missing are numeric even though half the rows are missing.
        assert_eq!(
            infer_column_type(&raw(&["1", "", "2", "", "3", ""])),
            ColumnType::Numeric
        );
    }

    #[test]
    fn minority_likeness_below_floor_is_string() {
        // 1 of 4 numeric = 0.25 <= 0.3.
        assert_eq!(
            infer_column_type(&raw(&["5", "a", "b", "c"])),
            ColumnType::Text
        );
    }

    fn arbitrary_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::from_raw("1.5")),
            Just(CellValue::from_raw("abc")),
            Just(CellValue::from_raw("2024-01-01")),
            Just(CellValue::from_raw("true")),
            Just(CellValue::Missing),
        ]
    }

    proptest! {
        /// Inference is a pure function of the multiset of cells:
        /// permuting row order never changes the inferred type.
        #[test]
        fn permutation_invariant(
            (original, shuffled) in proptest::collection::vec(arbitrary_cell(), 1..40)
                .prop_flat_map(|cells| {
                    let original = cells.clone();
                    Just(cells)
                        .prop_shuffle()
                        .prop_map(move |shuffled| (original.clone(), shuffled))
                })
        ) {
            prop_assert_eq!(infer_column_type(&original), infer_column_type(&shuffled));
        }
    }
}
