//! Untyped tabular input.
//!
//! A [`RawTable`] is the boundary shape for data arriving from JSON: named
//! columns plus rows of arbitrary JSON cells. It accepts two encodings:
//!
//! - record form: `[{"source": "A", "target": "B", "value": 10}, ...]`
//! - split form: `{"columns": ["source", "target", "value"], "data": [["A", "B", 10], ...]}`
//!
//! Typed validation happens once, when a [`crate::Relation`] is built from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A table of named columns and JSON cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableInput")]
pub struct RawTable {
    columns: Vec<String>,
    #[serde(rename = "data")]
    rows: Vec<Vec<Value>>,
}

/// Wire encodings accepted for a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableInput {
    Split {
        columns: Vec<String>,
        #[serde(default)]
        data: Vec<Vec<Value>>,
    },
    Records(Vec<Map<String, Value>>),
}

impl TryFrom<TableInput> for RawTable {
    type Error = Error;

    fn try_from(input: TableInput) -> Result<Self> {
        match input {
            TableInput::Split { columns, data } => Self::new(columns, data),
            TableInput::Records(records) => Ok(Self::from_records(records)),
        }
    }
}

impl RawTable {
    /// Create a table from column names and rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::RaggedRow` if a row's width differs from the column count,
    /// or `Error::MalformedTable` if a column name is repeated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if let Some(duplicate) = first_duplicate(&columns) {
            return Err(Error::malformed_table(format!(
                "column '{duplicate}' is declared more than once"
            )));
        }

        let expected = columns.len();
        rows.iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
            .map_or(Ok(()), |(row, cells)| {
                Err(Error::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                })
            })?;

        Ok(Self { columns, rows })
    }

    /// Create a table from JSON records.
    ///
    /// The columns are the union of all record keys in first-seen order. A
    /// record lacking a column contributes a `null` cell.
    #[must_use]
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let columns = records.iter().flat_map(Map::keys).fold(
            Vec::<String>::new(),
            |mut columns, key| {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
                columns
            },
        );

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Parse a table from JSON text in record or split form.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonParseFailed` if the text is not a table in either form.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::json_parse_failed(e.to_string()))
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve the positions of the required columns.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingColumns` naming every absent column.
    pub fn require_columns<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N]> {
        let positions = names.map(|name| self.column_index(name));
        let missing: Vec<&str> = names
            .iter()
            .zip(positions.iter())
            .filter(|(_, position)| position.is_none())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(positions.map(Option::unwrap_or_default))
        } else {
            Err(Error::missing_columns(missing))
        }
    }
}

fn first_duplicate(columns: &[String]) -> Option<&str> {
    columns.iter().enumerate().find_map(|(i, column)| {
        columns
            .iter()
            .take(i)
            .any(|earlier| earlier == column)
            .then_some(column.as_str())
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]
    #![allow(clippy::panic)]

    use super::*;
    use serde_json::json;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_split_form_parses() -> TestResult {
        let table = RawTable::from_json_str(
            r#"{"columns": ["source", "target", "value"], "data": [["A", "B", 10]]}"#,
        )?;
        assert_eq!(table.columns(), ["source", "target", "value"]);
        assert_eq!(table.len(), 1);
        Ok(())
    }

    #[test]
    fn test_record_form_fills_missing_cells_with_null() -> TestResult {
        let table = RawTable::from_json_str(
            r#"[{"source": "A", "target": "B", "value": 1}, {"source": "B", "target": "C"}]"#,
        )?;
        let value = table.column_index("value").expect("value column");
        assert_eq!(table.rows()[1][value], Value::Null);
        Ok(())
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let result = RawTable::new(
            vec!["source".into(), "target".into()],
            vec![vec![json!("A")]],
        );
        assert!(matches!(
            result,
            Err(Error::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let result = RawTable::new(vec!["source".into(), "source".into()], vec![]);
        assert!(matches!(result, Err(Error::MalformedTable { .. })));
    }

    #[test]
    fn test_require_columns_reports_all_missing() {
        let table = RawTable::new(vec!["source".into()], vec![]).expect("valid table");
        let err = table
            .require_columns(["source", "target", "value"])
            .expect_err("columns are missing");
        match err {
            Error::MissingColumns { missing } => assert_eq!(missing, ["target", "value"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_require_columns_resolves_positions() -> TestResult {
        let table = RawTable::new(
            vec!["value".into(), "target".into(), "source".into()],
            vec![],
        )?;
        assert_eq!(table.require_columns(["source", "target", "value"])?, [2, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_not_a_table_fails_to_parse() {
        let result = RawTable::from_json_str(r#""just a string""#);
        assert!(matches!(result, Err(Error::JsonParseFailed { .. })));
    }

    #[test]
    fn test_serializes_in_split_form() -> TestResult {
        let table = RawTable::new(vec!["source".into()], vec![vec![json!("A")]])?;
        let value = serde_json::to_value(&table)?;
        assert_eq!(value, json!({"columns": ["source"], "data": [["A"]]}));
        Ok(())
    }
}
