// Connector library - pedantic lints relaxed for API ergonomics
#![allow(clippy::pedantic)]

//! # `SheetDB`
//!
//! `sheetdb` uses a spreadsheet as a lightweight record store. Records are
//! flattened into rows, every row is bound to a durable key derived from the
//! record's `id`, and updates are addressed by key so they land on the right
//! row even after the sheet has grown or been reordered.
//!
//! ## Flow
//!
//! | Operation | Steps |
//! |-----------|-------|
//! | `append`  | project records → append rows → locate echoed range → bind keys |
//! | `update`  | project records → one key-addressed patch per record → single batch call |
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetdb::{records_from_json, GoogleSheetsStore, Session, SheetConnector};
//!
//! # async fn run() -> sheetdb::Result<()> {
//! let store = GoogleSheetsStore::new().with_session(Session::new("ya29.token"));
//! let mut connector = SheetConnector::new(store);
//!
//! let people = records_from_json(serde_json::json!([
//!     {"id": 1, "name": "Ada"},
//!     {"id": 2, "name": "Grace", "team": "compilers"}
//! ]))?;
//! connector.create(Some("People"), &people, None).await?;
//!
//! let edit = records_from_json(serde_json::json!({"id": 2, "name": "Grace H."}))?;
//! connector.update(&edit, None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod connector;
pub mod error;
pub mod key;
pub mod metadata;
pub mod projector;
pub mod range;
pub mod record;
pub mod session;
pub mod store;
pub mod update;

pub use config::SheetDbConfig;
pub use connector::{ConnectorOptions, CreateOutcome, SheetConnector};
pub use error::{Error, ErrorKind, Result};
pub use key::RecordKey;
pub use projector::{project, Projection};
pub use range::{locate, RangeDescriptor, RowSpan};
pub use record::{records_from_json, Cell, Record, Row};
pub use session::Session;
pub use store::{GoogleSheetsStore, MemoryStore, MetadataAck, PatchAck, SheetStore};
