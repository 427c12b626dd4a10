//! Error types for `SheetDB`.
//!
//! Every failure surfaces to the caller as an [`Error`]; nothing is logged and
//! swallowed. Codes follow the pattern `SHEETDB-XXX`.

use thiserror::Error;

/// Result type alias for `SheetDB` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], stable across messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operation needed a spreadsheet id and none was configured.
    UnconfiguredTarget,
    /// An operation needed store access and no session was attached.
    Unauthorized,
    /// A record without a key was submitted for update.
    UnaddressableRecord,
    /// The store itself failed or answered with an error.
    Upstream,
    /// Caller-supplied data could not be interpreted.
    InvalidInput,
    /// Configuration could not be loaded or is invalid.
    Config,
}

/// Errors that can occur in `SheetDB` operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No spreadsheet id configured (SHEETDB-001).
    #[error("[SHEETDB-001] No spreadsheet id specified")]
    UnconfiguredTarget,

    /// No session attached to the store (SHEETDB-002).
    #[error("[SHEETDB-002] Unauthorized: attach a session before calling the store")]
    Unauthorized,

    /// Record has no key and cannot be updated (SHEETDB-003).
    #[error("[SHEETDB-003] Record at position {index} has no id and cannot be updated")]
    UnaddressableRecord {
        /// Position of the record in the submitted batch.
        index: usize,
    },

    /// Store rejected the credentials (SHEETDB-004).
    #[error("[SHEETDB-004] Authentication failed: {0}")]
    Authentication(String),

    /// Store is rate limiting (SHEETDB-005).
    #[error("[SHEETDB-005] Rate limited{}", retry_hint(.retry_after))]
    RateLimit {
        /// Seconds from the `Retry-After` header, when the store sent one.
        retry_after: Option<u64>,
    },

    /// Store answered with an error status (SHEETDB-006).
    #[error("[SHEETDB-006] {store} error {status}: {body}")]
    Upstream {
        /// Store type name.
        store: &'static str,
        /// HTTP status code (or 0 for non-HTTP stores).
        status: u16,
        /// Response body or message.
        body: String,
    },

    /// Transport failure (SHEETDB-007).
    #[error("[SHEETDB-007] HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store response could not be interpreted (SHEETDB-008).
    #[error("[SHEETDB-008] Unexpected store response: {0}")]
    UnexpectedResponse(String),

    /// Range descriptor has no usable start row (SHEETDB-009).
    #[error("[SHEETDB-009] Invalid range descriptor '{0}'")]
    InvalidRange(String),

    /// Input data is not a record or list of records (SHEETDB-010).
    #[error("[SHEETDB-010] Invalid record data: {0}")]
    InvalidRecord(String),

    /// JSON error (SHEETDB-011).
    #[error("[SHEETDB-011] JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (SHEETDB-012).
    #[error("[SHEETDB-012] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (SHEETDB-013).
    #[error("[SHEETDB-013] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "SHEETDB-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnconfiguredTarget => "SHEETDB-001",
            Self::Unauthorized => "SHEETDB-002",
            Self::UnaddressableRecord { .. } => "SHEETDB-003",
            Self::Authentication(_) => "SHEETDB-004",
            Self::RateLimit { .. } => "SHEETDB-005",
            Self::Upstream { .. } => "SHEETDB-006",
            Self::Http(_) => "SHEETDB-007",
            Self::UnexpectedResponse(_) => "SHEETDB-008",
            Self::InvalidRange(_) => "SHEETDB-009",
            Self::InvalidRecord(_) => "SHEETDB-010",
            Self::Json(_) => "SHEETDB-011",
            Self::Io(_) => "SHEETDB-012",
            Self::Config(_) => "SHEETDB-013",
        }
    }

    /// Returns the kind of failure, for callers that branch on it.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnconfiguredTarget => ErrorKind::UnconfiguredTarget,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::UnaddressableRecord { .. } => ErrorKind::UnaddressableRecord,
            Self::Authentication(_)
            | Self::RateLimit { .. }
            | Self::Upstream { .. }
            | Self::Http(_)
            | Self::UnexpectedResponse(_) => ErrorKind::Upstream,
            Self::InvalidRange(_) | Self::InvalidRecord(_) | Self::Json(_) => {
                ErrorKind::InvalidInput
            }
            Self::Io(_) | Self::Config(_) => ErrorKind::Config,
        }
    }
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {secs}s"),
        None => String::new(),
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
