use pretty_assertions::assert_eq;

use super::*;

#[test]
fn display_is_the_concatenation_text() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Bool(true).to_string(), "True");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(
        Value::List(vec![Value::Int(1), Value::str("a"), Value::Null]).to_string(),
        "[1, a, null]"
    );
    assert_eq!(Value::Unresolved("x + 1".into()).to_string(), "x + 1");
}

#[test]
fn collapse_by_term_count() {
    assert_eq!(Value::collapse(Vec::new()), Value::Null);
    assert_eq!(Value::collapse(vec![Value::Int(5)]), Value::Int(5));
    assert_eq!(
        Value::collapse(vec![Value::Int(1), Value::Int(2)]),
        Value::List(vec![Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn equality_is_type_strict() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::str("x"), Value::Unresolved("x".into()));
    assert_eq!(Value::from("x"), Value::str("x"));
}

#[test]
fn literals_convert() {
    assert_eq!(Value::from(weft_ir::Literal::Bool(false)), Value::Bool(false));
    assert_eq!(
        Value::from(weft_ir::Literal::Str("\n".into())),
        Value::str("\n")
    );
}

#[test]
fn deeply_nested_lists_drop_without_recursion() {
    let mut value = Value::Int(0);
    for _ in 0..1_000_000 {
        value = Value::List(vec![value, Value::Null]);
    }
    drop(value);
}
