//! Tests for `range` module

use super::*;

fn span(start: Option<u64>, end: Option<u64>) -> RowSpan {
    RowSpan { start, end }
}

#[test]
fn test_locate_single_row_range() {
    assert_eq!(locate(&"Sheet1!A5:A5".into()), span(Some(5), Some(5)));
}

#[test]
fn test_locate_multi_row_range() {
    assert_eq!(locate(&"Sheet1!B2:B10".into()), span(Some(2), Some(10)));
}

#[test]
fn test_locate_bare_row_number() {
    assert_eq!(locate(&RangeDescriptor::Row(7)), span(Some(7), Some(8)));
}

#[test]
fn test_locate_numeric_text_is_row_number() {
    assert_eq!(locate(&"7".into()), span(Some(7), Some(8)));
}

#[test]
fn test_locate_single_cell() {
    assert_eq!(locate(&"Sheet1!C12".into()), span(Some(12), None));
}

#[test]
fn test_locate_without_sheet_prefix() {
    assert_eq!(locate(&"A3:F9".into()), span(Some(3), Some(9)));
}

#[test]
fn test_locate_sheet_name_with_digits_and_bang() {
    // Only the text after the last '!' is considered.
    assert_eq!(locate(&"'Q3 2024!x'!A14:D20".into()), span(Some(14), Some(20)));
}

#[test]
fn test_locate_whole_columns_has_no_rows() {
    assert_eq!(locate(&"Sheet1!A:C".into()), span(None, None));
}

#[test]
fn test_range_descriptor_deserializes_both_forms() {
    let row: RangeDescriptor = serde_json::from_str("4").unwrap();
    let a1: RangeDescriptor = serde_json::from_str(r#""Sheet1!A1:B2""#).unwrap();

    assert_eq!(row, RangeDescriptor::Row(4));
    assert_eq!(a1, RangeDescriptor::A1("Sheet1!A1:B2".to_string()));
}
