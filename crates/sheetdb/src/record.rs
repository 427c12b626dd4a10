//! Schema-less records and the typed cells they flatten into.

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::error::{Error, Result};

/// A record: field name to scalar or structured value, in input order.
pub type Record = Map<String, Value>;

/// One row of cells, positionally aligned with a column set.
pub type Row = Vec<Cell>;

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing field or `null`; written as an empty string.
    Empty,
    /// Text, including serialized structured values.
    Text(String),
    /// Numeric value, written as a number.
    Number(Number),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Converts a field value into a cell. Arrays and objects are serialized
    /// to compact JSON text.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Empty,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => Self::Number(n.clone()),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(structured @ (Value::Array(_) | Value::Object(_))) => {
                Self::Text(structured.to_string())
            }
        }
    }

    /// Whether the cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Interprets a JSON document as a batch of records.
///
/// A single object becomes a one-record batch, an array must hold only
/// objects, and `null` is an empty batch.
///
/// # Errors
///
/// Returns [`Error::InvalidRecord`] for any other shape.
pub fn records_from_json(value: Value) -> Result<Vec<Record>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(record) => Ok(vec![record]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(Error::InvalidRecord(format!(
                    "item {i} is {}, expected an object",
                    json_type_name(&other)
                ))),
            })
            .collect(),
        other => Err(Error::InvalidRecord(format!(
            "expected an object or an array of objects, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Detects the JSON type as a string for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
        Value::Null => "null",
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
