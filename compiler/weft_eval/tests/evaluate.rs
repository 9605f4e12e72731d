#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::rc::Rc;

use pretty_assertions::assert_eq;
use weft_diagnostic::ErrorCategory;
use weft_eval::{evaluate, EmptyScope, HostObject, MapScope, Scope, Value};

#[test]
fn unterminated_string_reports_one_lex_error() {
    let out = evaluate("\"abc", &EmptyScope);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors.count(ErrorCategory::Lex), 1);
    assert_eq!(
        out.errors.errors()[0].message,
        "missing closing token after '\"'"
    );
    assert_eq!(out.value, Value::str("abc"));
}

#[test]
fn embedded_keyword_is_a_plain_name() {
    assert_eq!(evaluate("IsItTrue", &EmptyScope).value, Value::str("IsItTrue"));
}

#[test]
fn literal_forms() {
    let out = evaluate("[0x1F, -2, .5, True, 'c']", &EmptyScope);
    assert!(out.errors.is_empty(), "{}", out.errors.render());
    assert_eq!(
        out.value,
        Value::List(vec![
            Value::Int(31),
            Value::Int(-2),
            Value::Float(0.5),
            Value::Bool(true),
            Value::str("c"),
        ])
    );
}

#[test]
fn host_object_round_trip() {
    let config = Rc::new(MapScope::new().with("retries", 3_i64));
    let object: HostObject = config.clone();
    let scope = MapScope::new().with("config", Value::Object(object));

    assert!(config.try_set_member("retries", Value::Int(5)));
    let out = evaluate("config.retries * 2", &scope);
    assert!(out.errors.is_empty());
    assert_eq!(out.value, Value::Int(10));
}

#[test]
fn errors_carry_positions() {
    let out = evaluate("[1,\n  \"x\" < 2]", &EmptyScope);
    let error = &out.errors.errors()[0];
    assert_eq!(error.category, ErrorCategory::Resolution);
    assert_eq!((error.row, error.col), (2, 3));
    assert!(out.errors.render().contains("error[resolution]"));
}
