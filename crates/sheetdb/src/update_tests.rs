//! Tests for `update` module

use super::*;
use crate::error::ErrorKind;
use crate::projector::project;
use crate::record::records_from_json;
use serde_json::json;

#[test]
fn test_build_addresses_by_key() {
    let patch = build(RecordKey::new("1"), vec![Cell::from("A")]);

    assert_eq!(patch.key().as_str(), "1");
    assert_eq!(patch.row(), &[Cell::from("A")]);
}

#[test]
fn test_patch_wire_format() {
    let patch = build(
        RecordKey::new("2"),
        vec![Cell::Number(2.into()), Cell::from("B"), Cell::Empty],
    );

    let json = serde_json::to_value(&patch).unwrap();

    assert_eq!(
        json,
        json!({
            "dataFilter": {"developerMetadataLookup": {"metadataKey": "2"}},
            "majorDimension": "ROWS",
            "values": [[2, "B", ""]]
        })
    );
}

#[test]
fn test_build_batch_one_patch_per_record() {
    let records = records_from_json(json!([
        {"id": 1, "name": "A"},
        {"id": "x", "name": "B"}
    ]))
    .unwrap();

    let patches = build_batch(project(&records, None)).unwrap();

    assert_eq!(patches.len(), 2);
    assert_eq!(patches[0].key().as_str(), "1");
    assert_eq!(patches[1].key().as_str(), "~x");
    assert_eq!(patches[1].row()[1], Cell::from("B"));
}

#[test]
fn test_build_batch_rejects_record_without_id() {
    let records = records_from_json(json!([
        {"id": 1, "name": "A"},
        {"name": "no id"}
    ]))
    .unwrap();

    let err = build_batch(project(&records, None)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnaddressableRecord);
    assert!(matches!(err, Error::UnaddressableRecord { index: 1 }));
}

#[test]
fn test_build_is_deterministic() {
    let records = records_from_json(json!({"id": 9, "v": "same"})).unwrap();

    let first = build_batch(project(&records, None)).unwrap();
    let second = build_batch(project(&records, None)).unwrap();

    assert_eq!(first, second);
}
