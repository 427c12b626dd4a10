//! In-memory store.
//!
//! Behaves like a single-tab spreadsheet: appends echo an A1 range, keys stay
//! attached to their row when rows are inserted or deleted above them, and
//! patches land on whichever row currently carries the key.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::error::{Error, Result};
use crate::key::RecordKey;
use crate::metadata::MetadataRegistration;
use crate::range::RangeDescriptor;
use crate::record::{Cell, Row};
use crate::store::{MetadataAck, PatchAck, SheetStore};
use crate::update::KeyedPatch;

const STORE_TYPE: &str = "memory";

#[derive(Debug, Default)]
struct MemorySheet {
    title: String,
    rows: Vec<Row>,
    /// Key and 0-based row it is attached to.
    metadata: Vec<(RecordKey, usize)>,
}

/// In-memory spreadsheet store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: RwLock<HashMap<String, MemorySheet>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Title the container was created with.
    #[must_use]
    pub fn title(&self, container: &str) -> Option<String> {
        self.sheets.read().get(container).map(|s| s.title.clone())
    }

    /// Snapshot of all rows of a container.
    #[must_use]
    pub fn rows(&self, container: &str) -> Option<Vec<Row>> {
        self.sheets.read().get(container).map(|s| s.rows.clone())
    }

    /// 1-based rows currently carrying `key`.
    #[must_use]
    pub fn rows_for_key(&self, container: &str, key: &RecordKey) -> Vec<u64> {
        self.sheets
            .read()
            .get(container)
            .map(|s| {
                s.metadata
                    .iter()
                    .filter(|(k, _)| k == key)
                    .map(|(_, row)| *row as u64 + 1)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Inserts `count` blank rows before the 1-based row `before`, moving
    /// every row at or below it, keys included.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the container does not exist or `before`
    /// is past the end of the sheet.
    pub fn insert_rows(&self, container: &str, before: u64, count: usize) -> Result<()> {
        let mut sheets = self.sheets.write();
        let sheet = sheet_mut(&mut sheets, container)?;
        let at = zero_based(before)?;
        if at > sheet.rows.len() {
            return Err(upstream(400, format!("row {before} is out of range")));
        }
        for _ in 0..count {
            sheet.rows.insert(at, Row::new());
        }
        for (_, row) in &mut sheet.metadata {
            if *row >= at {
                *row += count;
            }
        }
        Ok(())
    }

    /// Deletes the 1-based row `row` together with the keys attached to it.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the container or row does not exist.
    pub fn delete_row(&self, container: &str, row: u64) -> Result<()> {
        let mut sheets = self.sheets.write();
        let sheet = sheet_mut(&mut sheets, container)?;
        let at = zero_based(row)?;
        if at >= sheet.rows.len() {
            return Err(upstream(400, format!("row {row} is out of range")));
        }
        sheet.rows.remove(at);
        sheet.metadata.retain(|(_, r)| *r != at);
        for (_, r) in &mut sheet.metadata {
            if *r > at {
                *r -= 1;
            }
        }
        Ok(())
    }
}

fn upstream(status: u16, body: String) -> Error {
    Error::Upstream {
        store: STORE_TYPE,
        status,
        body,
    }
}

fn sheet_mut<'a>(
    sheets: &'a mut HashMap<String, MemorySheet>,
    container: &str,
) -> Result<&'a mut MemorySheet> {
    sheets
        .get_mut(container)
        .ok_or_else(|| upstream(404, format!("spreadsheet '{container}' not found")))
}

fn zero_based(row: u64) -> Result<usize> {
    row.checked_sub(1)
        .and_then(|r| usize::try_from(r).ok())
        .ok_or_else(|| upstream(400, format!("row {row} is out of range")))
}

/// Column letter for a 1-based column number (1 = A, 27 = AA).
fn column_letter(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

#[async_trait]
impl SheetStore for MemoryStore {
    fn store_type(&self) -> &'static str {
        STORE_TYPE
    }

    async fn create_container(&self, title: &str) -> Result<String> {
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.sheets.write().insert(
            id.clone(),
            MemorySheet {
                title: title.to_string(),
                ..MemorySheet::default()
            },
        );
        debug!("Created in-memory spreadsheet {}", id);
        Ok(id)
    }

    async fn append_rows(
        &self,
        container: &str,
        sheet: &str,
        rows: &[Row],
    ) -> Result<RangeDescriptor> {
        if rows.is_empty() {
            return Err(upstream(400, "no rows to append".to_string()));
        }
        let mut sheets = self.sheets.write();
        let target = sheet_mut(&mut sheets, container)?;

        let start = target.rows.len() + 1;
        target.rows.extend_from_slice(rows);
        let end = target.rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);

        Ok(RangeDescriptor::A1(format!(
            "{sheet}!A{start}:{}{end}",
            column_letter(width)
        )))
    }

    async fn register_metadata(
        &self,
        container: &str,
        registrations: &[MetadataRegistration],
    ) -> Result<MetadataAck> {
        let mut sheets = self.sheets.write();
        let sheet = sheet_mut(&mut sheets, container)?;

        // Validate everything before binding anything.
        let mut bound = Vec::with_capacity(registrations.len());
        for registration in registrations {
            let row = usize::try_from(registration.row_index())
                .ok()
                .filter(|row| *row < sheet.rows.len())
                .ok_or_else(|| {
                    upstream(
                        400,
                        format!("row index {} is out of range", registration.row_index()),
                    )
                })?;
            bound.push((registration.key().clone(), row));
        }
        sheet.metadata.extend(bound);

        Ok(MetadataAck {
            spreadsheet_id: container.to_string(),
            registered: registrations.len(),
        })
    }

    async fn patch_by_key(&self, container: &str, patches: &[KeyedPatch]) -> Result<PatchAck> {
        let mut sheets = self.sheets.write();
        let sheet = sheet_mut(&mut sheets, container)?;

        let mut ack = PatchAck {
            spreadsheet_id: container.to_string(),
            ..PatchAck::default()
        };
        for patch in patches {
            let targets: Vec<usize> = sheet
                .metadata
                .iter()
                .filter(|(k, _)| k == patch.key())
                .map(|(_, row)| *row)
                .collect();
            for target in targets {
                let row = &mut sheet.rows[target];
                let cells = patch.row();
                if row.len() < cells.len() {
                    row.resize(cells.len(), Cell::Empty);
                }
                row[..cells.len()].clone_from_slice(cells);
                ack.updated_rows += 1;
                ack.updated_cells += cells.len() as u64;
            }
        }
        Ok(ack)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
