//! Metadata key binding.
//!
//! After an append, every new row is pinned to its record key with a
//! document-visible metadata registration. The store keeps the registration
//! attached to the row as other rows are inserted or deleted, which is what
//! makes key-addressed updates relocation-proof.

use serde::{Deserialize, Serialize};

use crate::key::RecordKey;

/// Dimension a metadata location spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    /// Row dimension.
    Rows,
}

/// Who can see a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Visible to anything with access to the document.
    Document,
}

/// Half-open, 0-based span of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    /// Spanned dimension.
    pub dimension: Dimension,
    /// First row, inclusive.
    pub start_index: u64,
    /// Last row, exclusive.
    pub end_index: u64,
}

/// Where a registration is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataLocation {
    /// Attached row span.
    pub dimension_range: DimensionRange,
}

/// A key attached to a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperMetadata {
    /// Lookup key.
    pub metadata_key: RecordKey,
    /// Attached location.
    pub location: MetadataLocation,
    /// Scope of the registration.
    pub visibility: Visibility,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeveloperMetadata {
    /// Registration to create.
    pub developer_metadata: DeveloperMetadata,
}

/// One key registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRegistration {
    /// Create request.
    pub create_developer_metadata: CreateDeveloperMetadata,
}

impl MetadataRegistration {
    /// Pins `key` to the 1-based absolute row `row`.
    #[must_use]
    pub fn for_row(row: u64, key: RecordKey) -> Self {
        Self {
            create_developer_metadata: CreateDeveloperMetadata {
                developer_metadata: DeveloperMetadata {
                    metadata_key: key,
                    location: MetadataLocation {
                        dimension_range: DimensionRange {
                            dimension: Dimension::Rows,
                            start_index: row.saturating_sub(1),
                            end_index: row,
                        },
                    },
                    visibility: Visibility::Document,
                },
            },
        }
    }

    /// Registered key.
    #[must_use]
    pub fn key(&self) -> &RecordKey {
        &self.create_developer_metadata.developer_metadata.metadata_key
    }

    /// 0-based index of the registered row.
    #[must_use]
    pub fn row_index(&self) -> u64 {
        self.create_developer_metadata
            .developer_metadata
            .location
            .dimension_range
            .start_index
    }
}

/// Builds one registration per keyed row, starting at the 1-based row `start`.
///
/// `keys[i]` belongs to row `start + i`. Rows without a key are skipped; the
/// rows after them keep their position. Rows past `u64::MAX` are not emitted.
#[must_use]
pub fn bind(start: u64, keys: &[Option<RecordKey>]) -> Vec<MetadataRegistration> {
    keys.iter()
        .enumerate()
        .filter_map(|(offset, key)| {
            let row = start.checked_add(u64::try_from(offset).ok()?)?;
            key.clone()
                .map(|key| MetadataRegistration::for_row(row, key))
        })
        .collect()
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
