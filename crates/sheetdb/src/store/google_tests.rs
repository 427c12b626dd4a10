//! Tests for Google Sheets store.

use super::*;
use crate::error::ErrorKind;
use crate::key::RecordKey;
use crate::record::Cell;

fn test_store() -> GoogleSheetsStore {
    GoogleSheetsStore::with_api_base("http://localhost:8080", DEFAULT_TIMEOUT).unwrap()
}

#[test]
fn test_google_store_new() {
    let store = GoogleSheetsStore::new();
    assert_eq!(store.store_type(), "google-sheets");
    assert!(!store.is_authorized());
}

#[test]
fn test_google_store_rejects_bad_base() {
    assert!(GoogleSheetsStore::with_api_base("ftp://example.com", DEFAULT_TIMEOUT).is_err());
}

#[test]
fn test_endpoint_create() {
    let url = test_store().endpoint(&[]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/v4/spreadsheets");
}

#[test]
fn test_endpoint_append() {
    let url = test_store()
        .endpoint(&["abc123", "values", "Sheet1:append"])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/v4/spreadsheets/abc123/values/Sheet1:append"
    );
}

#[test]
fn test_endpoint_encodes_sheet_name() {
    let url = test_store()
        .endpoint(&["abc123", "values", "My Sheet:append"])
        .unwrap();
    assert!(url.as_str().ends_with("/values/My%20Sheet:append"));
}

#[test]
fn test_endpoint_with_base_path() {
    let store =
        GoogleSheetsStore::with_api_base("http://localhost:8080/proxy/", DEFAULT_TIMEOUT).unwrap();
    let url = store.endpoint(&["abc:batchUpdate"]).unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/proxy/v4/spreadsheets/abc:batchUpdate"
    );
}

#[test]
fn test_with_session_authorizes() {
    let store = test_store().with_session(Session::new("token"));
    assert!(store.is_authorized());
}

#[tokio::test]
async fn test_calls_without_session_are_unauthorized() {
    let store = test_store();

    let create = store.create_container("t").await.unwrap_err();
    let append = store
        .append_rows("abc", "Sheet1", &[vec![Cell::from("x")]])
        .await
        .unwrap_err();
    let patch = store
        .patch_by_key(
            "abc",
            &[crate::update::build(RecordKey::new("1"), vec![Cell::Empty])],
        )
        .await
        .unwrap_err();

    assert_eq!(create.kind(), ErrorKind::Unauthorized);
    assert_eq!(append.kind(), ErrorKind::Unauthorized);
    assert_eq!(patch.kind(), ErrorKind::Unauthorized);
}

#[test]
fn test_append_request_serialization() {
    let rows = vec![vec![Cell::from("a"), Cell::Empty]];
    let req = AppendRequest {
        major_dimension: "ROWS",
        values: &rows,
    };

    let json = serde_json::to_value(&req).unwrap();

    assert_eq!(json["majorDimension"], "ROWS");
    assert_eq!(json["values"][0][1], "");
}

#[test]
fn test_append_response_deserialization() {
    let json = r#"{"spreadsheetId":"abc","tableRange":"Sheet1!A1:C4","updates":{"spreadsheetId":"abc","updatedRange":"Sheet1!A5:C6","updatedRows":2}}"#;

    let response: AppendResponse = serde_json::from_str(json).unwrap();

    assert_eq!(
        response.updates.and_then(|u| u.updated_range).as_deref(),
        Some("Sheet1!A5:C6")
    );
}

#[test]
fn test_data_filter_response_defaults() {
    let response: DataFilterUpdateResponse = serde_json::from_str(r#"{"spreadsheetId":"abc"}"#).unwrap();

    assert_eq!(response.total_updated_rows, 0);
    assert_eq!(response.spreadsheet_id.as_deref(), Some("abc"));
}

#[test]
fn test_data_filter_request_serialization() {
    let patches = vec![crate::update::build(RecordKey::new("k"), vec![Cell::from("v")])];
    let req = DataFilterUpdateRequest {
        data: &patches,
        value_input_option: "RAW",
    };

    let json = serde_json::to_value(&req).unwrap();

    assert_eq!(json["valueInputOption"], "RAW");
    assert_eq!(
        json["data"][0]["dataFilter"]["developerMetadataLookup"]["metadataKey"],
        "k"
    );
}
