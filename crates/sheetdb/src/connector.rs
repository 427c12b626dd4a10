//! Record connector.
//!
//! [`SheetConnector`] is the interface callers use: create a spreadsheet,
//! append records (binding a key to every new row), and update records by key.
//! Each connector owns its store and spreadsheet id; any number of connectors
//! can live in one process.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::key::RecordKey;
use crate::metadata;
use crate::projector::project;
use crate::range::{locate, RangeDescriptor};
use crate::record::Record;
use crate::store::{MetadataAck, PatchAck, SheetStore};
use crate::update;

/// Title used when `create` is called without one.
pub const DEFAULT_TITLE: &str = "SheetDB Records";

/// Sheet (tab) appended to when none is configured.
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Connector options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorOptions {
    /// Spreadsheet all operations target.
    pub spreadsheet_id: Option<String>,
    /// Sheet (tab) rows are appended to.
    pub sheet: String,
    /// Title for spreadsheets created without one.
    pub default_title: String,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            sheet: DEFAULT_SHEET.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Result of [`SheetConnector::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    /// Id of the new spreadsheet.
    pub spreadsheet_id: String,
    /// Registration ack of the seed data, if any was written.
    pub seeded: Option<MetadataAck>,
}

/// Keyed record access to one spreadsheet.
pub struct SheetConnector<S: SheetStore> {
    store: S,
    options: ConnectorOptions,
}

impl<S: SheetStore> SheetConnector<S> {
    /// Creates a connector with default options.
    pub fn new(store: S) -> Self {
        Self::with_options(store, ConnectorOptions::default())
    }

    /// Creates a connector with explicit options.
    pub fn with_options(store: S, options: ConnectorOptions) -> Self {
        Self { store, options }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &ConnectorOptions {
        &self.options
    }

    /// The store backing this connector.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store, e.g. to attach a session.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Spreadsheet operations target, if configured.
    #[must_use]
    pub fn spreadsheet_id(&self) -> Option<&str> {
        self.options.spreadsheet_id.as_deref()
    }

    /// Points the connector at an existing spreadsheet.
    pub fn set_spreadsheet_id(&mut self, id: impl Into<String>) {
        self.options.spreadsheet_id = Some(id.into());
    }

    fn target(&self) -> Result<String> {
        self.options
            .spreadsheet_id
            .clone()
            .ok_or(Error::UnconfiguredTarget)
    }

    /// Creates a spreadsheet and targets it, optionally seeding it with
    /// `data` preceded by a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if creation or seeding fails. When seeding fails the
    /// connector still targets the new spreadsheet.
    pub async fn create(
        &mut self,
        title: Option<&str>,
        data: &[Record],
        order: Option<&[String]>,
    ) -> Result<CreateOutcome> {
        let title = title.unwrap_or(self.options.default_title.as_str()).to_string();
        info!("Creating spreadsheet '{}' on {}", title, self.store.store_type());

        let spreadsheet_id = self.store.create_container(&title).await?;
        self.set_spreadsheet_id(spreadsheet_id.clone());

        let seeded = if data.is_empty() {
            None
        } else {
            Some(self.append(data, order, true).await?)
        };

        Ok(CreateOutcome {
            spreadsheet_id,
            seeded,
        })
    }

    /// Appends records and binds each new row to its record key.
    ///
    /// With `with_header`, the column names are written first and bound to
    /// the reserved header key. Records without an id are written but get no
    /// key, so they can never be updated. An empty batch makes no call.
    ///
    /// Appends are not coordinated: two appends racing on the same sheet can
    /// bind keys to rows written by the other, because binding trusts the
    /// range echoed by the store. Serialize appends per sheet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnconfiguredTarget`] without a spreadsheet id, and
    /// any store error. Keys are not bound if the append fails.
    pub async fn append(
        &self,
        data: &[Record],
        order: Option<&[String]>,
        with_header: bool,
    ) -> Result<MetadataAck> {
        let spreadsheet_id = self.target()?;
        let projection = project(data, order);
        if projection.is_empty() {
            debug!("Nothing to append");
            return Ok(MetadataAck {
                spreadsheet_id,
                registered: 0,
            });
        }

        let mut rows = Vec::with_capacity(projection.len() + 1);
        let mut keys = Vec::with_capacity(projection.len() + 1);
        if with_header && !projection.columns.is_empty() {
            rows.push(projection.header_row());
            keys.push(Some(RecordKey::header()));
        }
        rows.extend(projection.values);
        keys.extend(projection.keys);

        info!(
            "Appending {} rows to {}!{}",
            rows.len(),
            spreadsheet_id,
            self.options.sheet
        );
        let range = self
            .store
            .append_rows(&spreadsheet_id, &self.options.sheet, &rows)
            .await?;
        debug!("Store wrote range {}", range);

        self.register_keys(&range, &keys).await
    }

    /// Binds `keys[i]` to row `start + i`, where `start` is the first row of
    /// `range`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnconfiguredTarget`] without a spreadsheet id,
    /// [`Error::InvalidRange`] if `range` names no start row, names row 0, or
    /// leaves no room for every key below `u64::MAX`, and any store error.
    pub async fn register_keys(
        &self,
        range: &RangeDescriptor,
        keys: &[Option<RecordKey>],
    ) -> Result<MetadataAck> {
        let spreadsheet_id = self.target()?;
        let last_offset = keys.len().saturating_sub(1) as u64;
        let start = locate(range)
            .start
            .filter(|start| *start > 0 && start.checked_add(last_offset).is_some())
            .ok_or_else(|| Error::InvalidRange(range.to_string()))?;

        let registrations = metadata::bind(start, keys);
        let skipped = keys.len() - registrations.len();
        if skipped > 0 {
            warn!("{} rows have no id and were not bound to a key", skipped);
        }
        if registrations.is_empty() {
            return Ok(MetadataAck {
                spreadsheet_id,
                registered: 0,
            });
        }

        debug!(
            "Registering {} keys from row {}",
            registrations.len(),
            start
        );
        self.store
            .register_metadata(&spreadsheet_id, &registrations)
            .await
    }

    /// Writes each record to the row holding its key, in one batch.
    ///
    /// An empty batch makes no call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnconfiguredTarget`] without a spreadsheet id,
    /// [`Error::UnaddressableRecord`] if any record has no id (nothing is
    /// sent), and any store error.
    pub async fn update(&self, data: &[Record], order: Option<&[String]>) -> Result<PatchAck> {
        let spreadsheet_id = self.target()?;
        let projection = project(data, order);
        if projection.is_empty() {
            debug!("Nothing to update");
            return Ok(PatchAck {
                spreadsheet_id,
                ..PatchAck::default()
            });
        }

        let patches = update::build_batch(projection)?;
        info!("Updating {} records in {}", patches.len(), spreadsheet_id);

        let ack = self.store.patch_by_key(&spreadsheet_id, &patches).await?;
        if ack.updated_rows < patches.len() as u64 {
            warn!(
                "{} of {} records matched no row",
                patches.len() as u64 - ack.updated_rows,
                patches.len()
            );
        }
        Ok(ack)
    }
}

#[cfg(test)]
#[path = "connector_tests.rs"]
mod tests;
