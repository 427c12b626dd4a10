//! Column projection.
//!
//! Flattens a batch of heterogeneous records into positional rows. The column
//! set is computed once per batch, either given explicitly or as the union of
//! all field names in first-seen order, and every row has exactly one cell per
//! column.

use std::collections::HashSet;

use crate::key::{self, RecordKey};
use crate::record::{Cell, Record, Row};

/// A batch of records flattened against one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Ordered, unique field names.
    pub columns: Vec<String>,
    /// Key of each record, `None` when it has no id.
    pub keys: Vec<Option<RecordKey>>,
    /// One row per record, aligned with `columns`.
    pub values: Vec<Row>,
}

impl Projection {
    /// Number of records in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the batch holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The column names as a row of text cells.
    #[must_use]
    pub fn header_row(&self) -> Row {
        self.columns.iter().map(|c| Cell::Text(c.clone())).collect()
    }
}

/// Computes the ordered union of field names across `records`.
#[must_use]
pub fn derive_columns(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for field in records.iter().flat_map(|r| r.keys()) {
        if seen.insert(field.as_str()) {
            columns.push(field.clone());
        }
    }
    columns
}

/// Flattens `records` into rows.
///
/// `order`, when given, is used verbatim as the column set. An empty batch
/// yields an empty projection.
#[must_use]
pub fn project(records: &[Record], order: Option<&[String]>) -> Projection {
    if records.is_empty() {
        return Projection::default();
    }

    let columns = match order {
        Some(order) => order.to_vec(),
        None => derive_columns(records),
    };

    let mut keys = Vec::with_capacity(records.len());
    let mut values = Vec::with_capacity(records.len());
    for record in records {
        keys.push(key::encode(record.get(key::ID_FIELD)));
        values.push(
            columns
                .iter()
                .map(|column| Cell::from_value(record.get(column)))
                .collect(),
        );
    }

    Projection {
        columns,
        keys,
        values,
    }
}

#[cfg(test)]
#[path = "projector_tests.rs"]
mod tests;
