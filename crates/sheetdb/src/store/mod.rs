//! Store backends.
//!
//! The connector needs four capabilities from a store: create a container,
//! append rows and echo the range written, register keys against rows, and
//! patch rows addressed by key in one batch.

pub mod common;
pub mod google;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metadata::MetadataRegistration;
use crate::range::RangeDescriptor;
use crate::record::Row;
use crate::update::KeyedPatch;

pub use google::GoogleSheetsStore;
pub use memory::MemoryStore;

/// Acknowledgement of a metadata registration batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAck {
    /// Spreadsheet the keys were registered in.
    pub spreadsheet_id: String,
    /// Number of registrations created.
    pub registered: usize,
}

/// Acknowledgement of a key-addressed patch batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchAck {
    /// Spreadsheet that was patched.
    pub spreadsheet_id: String,
    /// Rows actually written.
    pub updated_rows: u64,
    /// Cells actually written.
    pub updated_cells: u64,
}

/// Trait for spreadsheet-like stores.
///
/// Implement this trait to back the connector with another store.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Get the store type name.
    fn store_type(&self) -> &'static str;

    /// Provisions a new container and returns its id.
    async fn create_container(&self, title: &str) -> Result<String>;

    /// Appends `rows` after the last row of `sheet`.
    ///
    /// # Returns
    ///
    /// The range covering exactly the rows written.
    async fn append_rows(
        &self,
        container: &str,
        sheet: &str,
        rows: &[Row],
    ) -> Result<RangeDescriptor>;

    /// Durably binds keys to rows.
    async fn register_metadata(
        &self,
        container: &str,
        registrations: &[MetadataRegistration],
    ) -> Result<MetadataAck>;

    /// Writes each patch to the row currently holding its key, in one call.
    async fn patch_by_key(&self, container: &str, patches: &[KeyedPatch]) -> Result<PatchAck>;
}
