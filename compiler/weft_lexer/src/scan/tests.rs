#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn integer() {
    assert_eq!(number("42 + 1", 0), Scan::value(2, Literal::Int(42)));
}

#[test]
fn negative_decimal() {
    assert_eq!(number("x -2.5)", 2), Scan::value(4, Literal::Float(-2.5)));
}

#[test]
fn leading_dot() {
    assert_eq!(number(".5", 0), Scan::value(2, Literal::Float(0.5)));
}

#[test]
fn second_dot_ends_the_number() {
    assert_eq!(number("1.2.3", 0), Scan::value(3, Literal::Float(1.2)));
}

#[test]
fn minus_only_leads() {
    assert_eq!(number("5-3", 0), Scan::value(1, Literal::Int(5)));
}

#[test]
fn trailing_dot_is_an_error() {
    let scan = number("5.", 0);
    assert_eq!(scan.consumed, 2);
    assert_eq!(scan.value, None);
    let error = scan.error.unwrap();
    assert_eq!(error.offset, 1);
    assert_eq!(error.message, "decimal point with no subsequent digits");
}

#[test]
fn huge_integer_becomes_float() {
    let scan = number("99999999999999999999", 0);
    assert_eq!(scan.value, Some(Literal::Float(1e20)));
}

#[test]
fn hex_consumes_prefix_and_digits() {
    assert_eq!(hexadecimal("0xFF)", 0), Scan::value(4, Literal::Int(255)));
    let empty = hexadecimal("0xg", 0);
    assert_eq!(empty.consumed, 2);
    assert!(empty.error.is_some());
}

#[test]
fn booleans() {
    assert_eq!(boolean("True", 0), Scan::value(4, Literal::Bool(true)));
    assert_eq!(boolean("(False)", 1), Scan::value(5, Literal::Bool(false)));
}

#[test]
fn simple_escapes() {
    assert_eq!(escape(r"\n", 0), Scan::value(2, Literal::Str("\n".into())));
    assert_eq!(escape(r#"a\"b"#, 1), Scan::value(2, Literal::Str("\"".into())));
    assert_eq!(escape(r"\\", 0), Scan::value(2, Literal::Str("\\".into())));
}

#[test]
fn numeric_escapes() {
    assert_eq!(escape(r"\x41", 0), Scan::value(4, Literal::Str("A".into())));
    assert_eq!(escape(r"\u00E9", 0), Scan::value(6, Literal::Str("é".into())));
    assert_eq!(
        escape(r"\U0001F600", 0),
        Scan::value(10, Literal::Str("\u{1F600}".into()))
    );
    assert_eq!(escape(r"\101", 0), Scan::value(4, Literal::Str("A".into())));
    assert_eq!(escape(r"\0", 0), Scan::value(2, Literal::Str("\0".into())));
}

#[test]
fn short_unicode_escape_is_an_error() {
    let scan = escape(r"\u12", 0);
    assert_eq!(scan.consumed, 4);
    assert!(scan.error.is_some());
}

#[test]
fn surrogate_code_point_is_an_error() {
    let scan = escape(r"\uD800", 0);
    assert_eq!(scan.value, None);
    assert_eq!(
        scan.error.unwrap().message,
        "escape sequence is not a valid character"
    );
}

#[test]
fn unknown_escape_keeps_character() {
    let scan = escape(r"\q", 0);
    assert_eq!(scan.consumed, 2);
    assert_eq!(scan.value, Some(Literal::Str("q".into())));
    assert_eq!(scan.error.unwrap().message, "unknown escape sequence");
}

#[test]
fn line_continuation_escape() {
    assert_eq!(escape("\\\nx", 0), Scan::value(2, Literal::Str(String::new())));
    assert_eq!(escape("\\\r\nx", 0), Scan::value(3, Literal::Str(String::new())));
}

#[test]
fn dangling_backslash() {
    let scan = escape("\\", 0);
    assert_eq!(scan.consumed, 1);
    assert!(scan.error.is_some());
}

#[test]
fn predicates() {
    assert!(minus_starts_number("-1", 0));
    assert!(minus_starts_number("-.5", 0));
    assert!(!minus_starts_number("- 1", 0));
    assert!(!minus_starts_number("-", 0));
    assert!(dot_starts_number(".5", 0));
    assert!(!dot_starts_number("a.b", 1));
    assert!(escapes_line_break("\\\n", 0));
    assert!(!escapes_line_break("\\n", 0));
}

#[test]
fn line_break_scans() {
    let scan = line_break_in_literal("ab\r\n", 2);
    assert_eq!(scan.consumed, 2);
    assert!(scan.error.is_some());
    assert_eq!(line_continuation("\\\r\n", 0), Scan::plain(3));
    assert_eq!(line_continuation("\\\n", 0), Scan::plain(2));
}
