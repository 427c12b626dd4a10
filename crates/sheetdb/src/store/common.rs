//! Common utilities shared across HTTP-backed stores.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default HTTP timeout for store calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a configured HTTP client with timeout.
#[must_use]
pub fn create_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Validates a store base URL.
pub fn validate_url(url: &str) -> Result<()> {
    let has_valid_scheme = ["http://", "https://"].iter().any(|s| url.starts_with(s));
    if !has_valid_scheme {
        return Err(Error::Config(format!(
            "Invalid URL scheme in '{}'. Allowed: http, https",
            url
        )));
    }

    if reqwest::Url::parse(url).is_err() {
        return Err(Error::Config(format!("Invalid URL format: {}", url)));
    }

    Ok(())
}

/// Reads a `Retry-After` header given in seconds. HTTP-date values are ignored.
pub fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Handles HTTP error responses and returns appropriate errors.
pub fn handle_http_error(
    status_code: u16,
    body: &str,
    store: &'static str,
    retry_after: Option<u64>,
) -> Error {
    match status_code {
        429 => Error::RateLimit { retry_after },
        401 | 403 => Error::Authentication(format!("{} auth failed: {}", store, body)),
        _ => Error::Upstream {
            store,
            status: status_code,
            body: body.to_string(),
        },
    }
}
