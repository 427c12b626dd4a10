//! Tests for `error` module

use super::*;

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors: Vec<Error> = vec![
        Error::UnconfiguredTarget,
        Error::Unauthorized,
        Error::UnaddressableRecord { index: 0 },
        Error::Authentication("test".into()),
        Error::RateLimit { retry_after: Some(60) },
        Error::Upstream {
            store: "memory",
            status: 500,
            body: "test".into(),
        },
        Error::UnexpectedResponse("test".into()),
        Error::InvalidRange("test".into()),
        Error::InvalidRecord("test".into()),
        Error::Io(std::io::Error::other("test")),
        Error::Config("test".into()),
    ];

    // Act
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");
    for code in &codes {
        assert!(code.starts_with("SHEETDB-"), "Code {code} should start with SHEETDB-");
    }
}

#[test]
fn test_error_display_includes_code() {
    let err = Error::UnaddressableRecord { index: 3 };

    let display = format!("{err}");

    assert!(display.contains("SHEETDB-003"));
    assert!(display.contains("position 3"));
}

#[test]
fn test_rate_limit_display_with_and_without_hint() {
    let with_hint = Error::RateLimit {
        retry_after: Some(17),
    };
    let without_hint = Error::RateLimit { retry_after: None };

    assert_eq!(with_hint.to_string(), "[SHEETDB-005] Rate limited, retry after 17s");
    assert_eq!(without_hint.to_string(), "[SHEETDB-005] Rate limited");
}

#[test]
fn test_unconfigured_and_unauthorized_are_distinct_kinds() {
    assert_eq!(Error::UnconfiguredTarget.kind(), ErrorKind::UnconfiguredTarget);
    assert_eq!(Error::Unauthorized.kind(), ErrorKind::Unauthorized);
    assert_ne!(Error::UnconfiguredTarget.kind(), Error::Unauthorized.kind());
}

#[test]
fn test_store_failures_are_upstream() {
    let errors = [
        Error::Authentication("denied".into()),
        Error::RateLimit { retry_after: Some(60) },
        Error::Upstream {
            store: "google-sheets",
            status: 400,
            body: "bad request".into(),
        },
        Error::UnexpectedResponse("missing updatedRange".into()),
    ];

    for err in &errors {
        assert_eq!(err.kind(), ErrorKind::Upstream, "{err}");
    }
}

#[test]
fn test_json_error_converts() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let err: Error = parse_err.into();

    assert_eq!(err.code(), "SHEETDB-011");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
