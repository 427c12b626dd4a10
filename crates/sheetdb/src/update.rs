//! Key-addressed update requests.
//!
//! A patch names its target by record key instead of row number; the store
//! resolves the key through its metadata registrations at write time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::key::RecordKey;
use crate::projector::Projection;
use crate::record::{Cell, Row};

/// Lookup of a metadata registration by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataLookup {
    /// Key to resolve.
    pub metadata_key: RecordKey,
}

/// Filter selecting the rows a patch applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFilter {
    /// Metadata lookup.
    pub developer_metadata_lookup: MetadataLookup,
}

/// A value row addressed by record key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedPatch {
    /// Target selector.
    pub data_filter: DataFilter,
    /// Always `ROWS`.
    pub major_dimension: &'static str,
    /// Values to write; a single row.
    pub values: Vec<Row>,
}

impl KeyedPatch {
    /// Key the patch is addressed to.
    #[must_use]
    pub fn key(&self) -> &RecordKey {
        &self.data_filter.developer_metadata_lookup.metadata_key
    }

    /// Row the patch writes.
    #[must_use]
    pub fn row(&self) -> &[Cell] {
        self.values.first().map(Vec::as_slice).unwrap_or_default()
    }
}

/// Builds the patch writing `row` to whichever row holds `key`.
#[must_use]
pub fn build(key: RecordKey, row: Row) -> KeyedPatch {
    KeyedPatch {
        data_filter: DataFilter {
            developer_metadata_lookup: MetadataLookup { metadata_key: key },
        },
        major_dimension: "ROWS",
        values: vec![row],
    }
}

/// Builds one patch per record of a projection.
///
/// # Errors
///
/// Returns [`Error::UnaddressableRecord`] for the first record without a key;
/// no patches are produced in that case.
pub fn build_batch(projection: Projection) -> Result<Vec<KeyedPatch>> {
    if let Some(index) = projection.keys.iter().position(Option::is_none) {
        return Err(Error::UnaddressableRecord { index });
    }
    Ok(projection
        .keys
        .into_iter()
        .flatten()
        .zip(projection.values)
        .map(|(key, row)| build(key, row))
        .collect())
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
