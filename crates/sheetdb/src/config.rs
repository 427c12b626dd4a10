//! `SheetDB` Configuration Module
//!
//! Provides configuration file support via `sheetdb.toml` and environment
//! variables.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`SHEETDB_*`)
//! 2. Configuration file (`sheetdb.toml`)
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::connector::{ConnectorOptions, DEFAULT_SHEET, DEFAULT_TITLE};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::store::common::validate_url;
use crate::store::google::{GoogleSheetsStore, DEFAULT_API_BASE};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "sheetdb.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetDbConfig {
    /// Spreadsheet to target; unset until one is created.
    pub spreadsheet_id: Option<String>,
    /// Sheet (tab) rows are appended to.
    pub sheet: String,
    /// Base URL of the Sheets API.
    pub api_base: String,
    /// OAuth access token. Prefer `SHEETDB_ACCESS_TOKEN` over the file.
    pub access_token: Option<String>,
    /// Title for spreadsheets created without one.
    pub default_title: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Log level: error, warn, info, debug, trace.
    pub log_level: String,
}

impl Default for SheetDbConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            sheet: DEFAULT_SHEET.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: None,
            default_title: DEFAULT_TITLE.to_string(),
            timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl SheetDbConfig {
    /// Loads configuration from `sheetdb.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from a specific file path and the environment.
    /// A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SHEETDB_"))
            .extract()
            .map_err(Error::from)
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .map_err(Error::from)
    }

    /// Serializes the configuration to TOML, with the access token masked.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.access_token.is_some() {
            shown.access_token = Some("<redacted>".to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.sheet.trim().is_empty() {
            return Err(Error::Config("sheet name cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "log_level '{}' is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if matches!(&self.spreadsheet_id, Some(id) if id.trim().is_empty()) {
            return Err(Error::Config(
                "spreadsheet_id cannot be empty when set".to_string(),
            ));
        }
        validate_url(&self.api_base)
    }

    /// Connector options derived from this configuration.
    #[must_use]
    pub fn connector_options(&self) -> ConnectorOptions {
        ConnectorOptions {
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheet: self.sheet.clone(),
            default_title: self.default_title.clone(),
        }
    }

    /// Builds a Google Sheets store, authorized when an access token is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is invalid.
    pub fn google_store(&self) -> Result<GoogleSheetsStore> {
        let mut store =
            GoogleSheetsStore::with_api_base(&self.api_base, Duration::from_secs(self.timeout_secs))?;
        if let Some(token) = &self.access_token {
            store.authorize(Session::new(token.clone()));
        }
        Ok(store)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
