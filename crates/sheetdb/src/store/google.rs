//! Google Sheets store.
//!
//! Talks to the Sheets v4 REST API: `spreadsheets.create`,
//! `spreadsheets.values.append`, `spreadsheets.batchUpdate` for developer
//! metadata, and `spreadsheets.values.batchUpdateByDataFilter` for
//! key-addressed patches. Values are always written `RAW`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::metadata::MetadataRegistration;
use crate::range::RangeDescriptor;
use crate::record::Row;
use crate::session::Session;
use crate::store::common::{
    create_http_client, handle_http_error, retry_after_secs, validate_url, DEFAULT_TIMEOUT,
};
use crate::store::{MetadataAck, PatchAck, SheetStore};
use crate::update::KeyedPatch;

/// Public endpoint of the Sheets API.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

const STORE_TYPE: &str = "google-sheets";

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    properties: SpreadsheetProperties<'a>,
}

#[derive(Debug, Serialize)]
struct SpreadsheetProperties<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    spreadsheet_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendRequest<'a> {
    major_dimension: &'static str,
    values: &'a [Row],
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    updated_range: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchUpdateRequest<'a> {
    requests: &'a [MetadataRegistration],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    spreadsheet_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataFilterUpdateRequest<'a> {
    data: &'a [KeyedPatch],
    value_input_option: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DataFilterUpdateResponse {
    spreadsheet_id: Option<String>,
    total_updated_rows: u64,
    total_updated_cells: u64,
}

/// Google Sheets store.
pub struct GoogleSheetsStore {
    api_base: String,
    client: Client,
    session: Option<Session>,
}

impl GoogleSheetsStore {
    /// Creates a store against the public API with no session attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            client: create_http_client(DEFAULT_TIMEOUT),
            session: None,
        }
    }

    /// Creates a store against a custom API base URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is not http(s).
    pub fn with_api_base(api_base: &str, timeout: Duration) -> Result<Self> {
        validate_url(api_base)?;
        Ok(Self {
            api_base: api_base.to_string(),
            client: create_http_client(timeout),
            session: None,
        })
    }

    /// Attaches a session; later calls use its credentials.
    pub fn authorize(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Builder form of [`authorize`](Self::authorize).
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.authorize(session);
        self
    }

    /// Whether a session is attached.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::Unauthorized)
    }

    /// Builds `{api_base}/v4/spreadsheets/{segments...}`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| Error::Config(format!("Invalid URL format: {}", e)))?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("Cannot use '{}' as API base", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    /// Sends an authenticated JSON POST and decodes the response.
    async fn post<B, R>(&self, url: Url, query: &[(&str, &str)], body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let session = self.session()?;
        debug!("POST {}", url.path());

        let response = self
            .client
            .post(url)
            .query(query)
            .bearer_auth(session.access_token())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = retry_after_secs(response.headers());
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(handle_http_error(
                status.as_u16(),
                &body,
                STORE_TYPE,
                retry_after,
            ));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(format!("Failed to parse response: {}", e)))
    }
}

impl Default for GoogleSheetsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    fn store_type(&self) -> &'static str {
        STORE_TYPE
    }

    async fn create_container(&self, title: &str) -> Result<String> {
        let url = self.endpoint(&[])?;
        let body = CreateRequest {
            properties: SpreadsheetProperties { title },
        };
        let created: Spreadsheet = self.post(url, &[], &body).await?;
        Ok(created.spreadsheet_id)
    }

    async fn append_rows(
        &self,
        container: &str,
        sheet: &str,
        rows: &[Row],
    ) -> Result<RangeDescriptor> {
        let action = format!("{sheet}:append");
        let url = self.endpoint(&[container, "values", action.as_str()])?;
        let body = AppendRequest {
            major_dimension: "ROWS",
            values: rows,
        };
        let query = [
            ("valueInputOption", "RAW"),
            ("insertDataOption", "INSERT_ROWS"),
        ];
        let response: AppendResponse = self.post(url, &query, &body).await?;

        response
            .updates
            .and_then(|u| u.updated_range)
            .map(RangeDescriptor::A1)
            .ok_or_else(|| {
                Error::UnexpectedResponse("append response has no updatedRange".to_string())
            })
    }

    async fn register_metadata(
        &self,
        container: &str,
        registrations: &[MetadataRegistration],
    ) -> Result<MetadataAck> {
        let action = format!("{container}:batchUpdate");
        let url = self.endpoint(&[action.as_str()])?;
        let body = BatchUpdateRequest {
            requests: registrations,
        };
        let response: BatchUpdateResponse = self.post(url, &[], &body).await?;

        Ok(MetadataAck {
            spreadsheet_id: response
                .spreadsheet_id
                .unwrap_or_else(|| container.to_string()),
            registered: registrations.len(),
        })
    }

    async fn patch_by_key(&self, container: &str, patches: &[KeyedPatch]) -> Result<PatchAck> {
        let url = self.endpoint(&[container, "values:batchUpdateByDataFilter"])?;
        let body = DataFilterUpdateRequest {
            data: patches,
            value_input_option: "RAW",
        };
        let response: DataFilterUpdateResponse = self.post(url, &[], &body).await?;

        Ok(PatchAck {
            spreadsheet_id: response
                .spreadsheet_id
                .unwrap_or_else(|| container.to_string()),
            updated_rows: response.total_updated_rows,
            updated_cells: response.total_updated_cells,
        })
    }
}

#[cfg(test)]
#[path = "google_tests.rs"]
mod tests;
