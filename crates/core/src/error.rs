//! Core error types for InsightDash operations.
//!
//! All errors are explicit and typed - no panics allowed.

use thiserror::Error;

/// Core error type for InsightDash operations.
#[derive(Debug, Error)]
pub enum Error {
    // Schema errors
    #[error("table is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("row {row} has {found} cells but the table declares {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    // Type errors
    #[error("row {row}: value must be a number, found {found}")]
    NonNumericValue { row: usize, found: String },

    #[error("row {row}: column '{column}' must hold a label, found {found}")]
    InvalidLabel {
        row: usize,
        column: String,
        found: String,
    },

    #[error("malformed table: {reason}")]
    MalformedTable { reason: String },

    // Graph errors
    #[error("sankey invariant violated: {reason}")]
    InvariantViolated { reason: String },

    // Parsing and generation errors
    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },

    #[error("generation failed: {reason}")]
    GenerationFailed { reason: String },
}

impl Error {
    /// Create a missing-columns schema error.
    pub fn missing_columns<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a non-numeric value error.
    pub fn non_numeric_value(row: usize, found: impl Into<String>) -> Self {
        Self::NonNumericValue {
            row,
            found: found.into(),
        }
    }

    /// Create an invalid label error.
    pub fn invalid_label(row: usize, column: impl Into<String>, found: impl Into<String>) -> Self {
        Self::InvalidLabel {
            row,
            column: column.into(),
            found: found.into(),
        }
    }

    /// Create a malformed table error.
    pub fn malformed_table(reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            reason: reason.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant_violated(reason: impl Into<String>) -> Self {
        Self::InvariantViolated {
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }

    /// Create a generation error.
    pub fn generation_failed(reason: impl Into<String>) -> Self {
        Self::GenerationFailed {
            reason: reason.into(),
        }
    }

    /// Whether the error stems from the shape of the input table rather than its cells.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumns { .. } | Self::RaggedRow { .. } | Self::MalformedTable { .. }
        )
    }

    /// Whether the error stems from a cell of the wrong type.
    #[must_use]
    pub const fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::NonNumericValue { .. } | Self::InvalidLabel { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_lists_every_column() {
        let err = Error::missing_columns(["target", "value"]);
        assert_eq!(
            err.to_string(),
            "table is missing required columns: target, value"
        );
        assert!(err.is_schema_error());
        assert!(!err.is_type_error());
    }

    #[test]
    fn test_non_numeric_value_is_type_error() {
        let err = Error::non_numeric_value(3, "\"lots\"");
        assert!(err.is_type_error());
        assert!(err.to_string().contains("row 3"));
    }
}
