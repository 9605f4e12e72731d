use super::*;

#[test]
fn single_line() {
    let src = "hello";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.offset_to_line_col(src, 4), (1, 5));
}

#[test]
fn offset_on_newline_belongs_to_its_line() {
    let src = "ab\ncd";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.offset_to_line_col(src, 2), (1, 3));
    assert_eq!(table.offset_to_line_col(src, 3), (2, 1));
}

#[test]
fn column_counts_characters() {
    let src = "é = x";
    let table = LineOffsetTable::build(src);
    // 'é' is two bytes; '=' sits at byte 3 but column 3.
    assert_eq!(table.offset_to_line_col(src, 3), (1, 3));
}

#[test]
fn offset_past_end_clamps() {
    let src = "ab";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.offset_to_line_col(src, 10), (1, 3));
}

#[test]
fn line_text_strips_terminators() {
    let src = "one\r\ntwo\nthree";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.line_text(src, 1), Some("one"));
    assert_eq!(table.line_text(src, 2), Some("two"));
    assert_eq!(table.line_text(src, 3), Some("three"));
    assert_eq!(table.line_text(src, 4), None);
    assert_eq!(table.line_start_offset(0), None);
}
