//! Typed flow relation.
//!
//! A [`Relation`] is an ordered sequence of [`FlowRow`] records, validated once
//! at the boundary from a [`RawTable`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{Error, RawTable, Result};

/// Column holding the flow origin label.
pub const SOURCE_COLUMN: &str = "source";
/// Column holding the flow destination label.
pub const TARGET_COLUMN: &str = "target";
/// Column holding the flow magnitude.
pub const VALUE_COLUMN: &str = "value";
/// Columns a table must expose to be read as a relation.
pub const REQUIRED_COLUMNS: [&str; 3] = [SOURCE_COLUMN, TARGET_COLUMN, VALUE_COLUMN];

static NULL_CELL: Value = Value::Null;

/// Opaque node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a label.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read a label from a table cell.
    ///
    /// Strings are taken verbatim; numbers and booleans use their JSON text,
    /// with integral floats written as integers so `1` and `1.0` name one node.
    fn from_cell(row: usize, column: &str, cell: &Value) -> Result<Self> {
        match cell {
            Value::String(s) => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(number_text(n))),
            Value::Bool(b) => Ok(Self(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                Err(Error::invalid_label(row, column, cell.to_string()))
            }
        }
    }
}

fn number_text(n: &Number) -> String {
    n.as_i64()
        .map(|i| i.to_string())
        .or_else(|| n.as_u64().map(|u| u.to_string()))
        // f64 Display drops a zero fraction
        .or_else(|| n.as_f64().map(|f| f.to_string()))
        .map(|text| if text == "-0" { "0".to_string() } else { text })
        .unwrap_or_else(|| n.to_string())
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One row of the relation: a flow of `value` from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRow {
    pub source: Label,
    pub target: Label,
    /// Flow magnitude. Negative values are carried through unchanged.
    pub value: f64,
}

impl FlowRow {
    /// Create a row.
    pub fn new(source: impl Into<Label>, target: impl Into<Label>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

/// An ordered, validated sequence of flow rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relation {
    rows: Vec<FlowRow>,
}

impl Relation {
    /// Create a relation from typed rows.
    #[must_use]
    pub const fn new(rows: Vec<FlowRow>) -> Self {
        Self { rows }
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[FlowRow] {
        &self.rows
    }

    /// Iterate rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, FlowRow> {
        self.rows.iter()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the relation has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<FlowRow> for Relation {
    fn from_iter<I: IntoIterator<Item = FlowRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Relation {
    type Item = &'a FlowRow;
    type IntoIter = std::slice::Iter<'a, FlowRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<&RawTable> for Relation {
    type Error = Error;

    /// Validate a table into a relation.
    ///
    /// Required columns are checked before any row is read.
    fn try_from(table: &RawTable) -> Result<Self> {
        let [source, target, value] = table.require_columns(REQUIRED_COLUMNS)?;

        table
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| -> Result<FlowRow> {
                let cell = |position: usize| cells.get(position).unwrap_or(&NULL_CELL);
                Ok(FlowRow {
                    source: Label::from_cell(row, SOURCE_COLUMN, cell(source))?,
                    target: Label::from_cell(row, TARGET_COLUMN, cell(target))?,
                    value: cell(value)
                        .as_f64()
                        .ok_or_else(|| Error::non_numeric_value(row, cell(value).to_string()))?,
                })
            })
            .collect()
    }
}
