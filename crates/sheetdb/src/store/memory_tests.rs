//! Tests for in-memory store.

use super::*;
use crate::error::ErrorKind;
use crate::metadata::bind;
use crate::range::locate;
use crate::update::build;

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| Cell::from(*c)).collect()
}

fn key(k: &str) -> RecordKey {
    RecordKey::new(k)
}

#[test]
fn test_column_letter() {
    assert_eq!(column_letter(1), "A");
    assert_eq!(column_letter(3), "C");
    assert_eq!(column_letter(26), "Z");
    assert_eq!(column_letter(27), "AA");
    assert_eq!(column_letter(52), "AZ");
    assert_eq!(column_letter(703), "AAA");
}

#[tokio::test]
async fn test_create_container_unique_ids() {
    let store = MemoryStore::new();

    let a = store.create_container("A").await.unwrap();
    let b = store.create_container("B").await.unwrap();

    assert_ne!(a, b);
    assert_eq!(store.title(&a).as_deref(), Some("A"));
}

#[tokio::test]
async fn test_append_echoes_written_range() {
    // Arrange
    let store = MemoryStore::new();
    let id = store.create_container("t").await.unwrap();
    store
        .append_rows(&id, "Sheet1", &[row(&["id", "name", "extra"])])
        .await
        .unwrap();

    // Act
    let range = store
        .append_rows(&id, "Sheet1", &[row(&["1", "A"]), row(&["2", "B", "x"])])
        .await
        .unwrap();

    // Assert
    assert_eq!(range, RangeDescriptor::A1("Sheet1!A2:C3".to_string()));
    let span = locate(&range);
    assert_eq!((span.start, span.end), (Some(2), Some(3)));
}

#[tokio::test]
async fn test_append_unknown_container_fails() {
    let store = MemoryStore::new();

    let err = store
        .append_rows("missing", "Sheet1", &[row(&["x"])])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn test_key_follows_row_after_insert_above() {
    // Arrange
    let store = MemoryStore::new();
    let id = store.create_container("t").await.unwrap();
    store
        .append_rows(&id, "Sheet1", &[row(&["1", "A"]), row(&["2", "B"])])
        .await
        .unwrap();
    store
        .register_metadata(&id, &bind(1, &[Some(key("1")), Some(key("2"))]))
        .await
        .unwrap();

    // Act
    store.insert_rows(&id, 1, 3).unwrap();
    let ack = store
        .patch_by_key(&id, &[build(key("2"), row(&["2", "B2"]))])
        .await
        .unwrap();

    // Assert
    assert_eq!(ack.updated_rows, 1);
    assert_eq!(store.rows_for_key(&id, &key("2")), vec![5]);
    let rows = store.rows(&id).unwrap();
    assert_eq!(rows[4], row(&["2", "B2"]));
    assert_eq!(rows[3], row(&["1", "A"]));
}

#[tokio::test]
async fn test_key_follows_row_after_delete_above() {
    let store = MemoryStore::new();
    let id = store.create_container("t").await.unwrap();
    store
        .append_rows(&id, "Sheet1", &[row(&["1"]), row(&["2"]), row(&["3"])])
        .await
        .unwrap();
    store
        .register_metadata(&id, &bind(1, &[Some(key("1")), Some(key("2")), Some(key("3"))]))
        .await
        .unwrap();

    store.delete_row(&id, 1).unwrap();

    assert!(store.rows_for_key(&id, &key("1")).is_empty());
    assert_eq!(store.rows_for_key(&id, &key("3")), vec![2]);
}

#[tokio::test]
async fn test_register_out_of_range_binds_nothing() {
    let store = MemoryStore::new();
    let id = store.create_container("t").await.unwrap();
    store.append_rows(&id, "Sheet1", &[row(&["1"])]).await.unwrap();

    let err = store
        .register_metadata(&id, &bind(1, &[Some(key("a")), Some(key("b"))]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(store.rows_for_key(&id, &key("a")).is_empty());
}

#[tokio::test]
async fn test_patch_unknown_key_updates_nothing() {
    let store = MemoryStore::new();
    let id = store.create_container("t").await.unwrap();
    store.append_rows(&id, "Sheet1", &[row(&["1"])]).await.unwrap();

    let ack = store
        .patch_by_key(&id, &[build(key("nope"), row(&["x"]))])
        .await
        .unwrap();

    assert_eq!(ack.updated_rows, 0);
    assert_eq!(store.rows(&id).unwrap()[0], row(&["1"]));
}

#[tokio::test]
async fn test_patch_keeps_cells_beyond_patch_width() {
    let store = MemoryStore::new();
    let id = store.create_container("t").await.unwrap();
    store
        .append_rows(&id, "Sheet1", &[row(&["1", "A", "keep"])])
        .await
        .unwrap();
    store
        .register_metadata(&id, &bind(1, &[Some(key("1"))]))
        .await
        .unwrap();

    store
        .patch_by_key(&id, &[build(key("1"), row(&["1", "Z"]))])
        .await
        .unwrap();

    assert_eq!(store.rows(&id).unwrap()[0], row(&["1", "Z", "keep"]));
}
