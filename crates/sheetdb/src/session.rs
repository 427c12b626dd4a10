//! Authorized session handle.
//!
//! A session is owned by the store it is attached to, never shared through
//! process-wide state, so independent sessions can coexist in one process.

use std::fmt;

/// Bearer credentials for the spreadsheet API.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
}

impl Session {
    /// Creates a session from an already-issued access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// The access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .finish()
    }
}
