#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;

fn eval(op: Operator, left: impl Into<Value>, right: impl Into<Value>) -> Value {
    evaluate_binary(op, &left.into(), &right.into()).unwrap()
}

fn error(op: Operator, left: impl Into<Value>, right: impl Into<Value>) -> String {
    evaluate_binary(op, &left.into(), &right.into())
        .unwrap_err()
        .message
}

#[test]
fn integral_arithmetic_stays_integral() {
    assert_eq!(eval(Operator::Add, 2_i64, 3_i64), Value::Int(5));
    assert_eq!(eval(Operator::Subtract, 2_i64, 3_i64), Value::Int(-1));
    assert_eq!(eval(Operator::Multiply, 4_i64, 3_i64), Value::Int(12));
    assert_eq!(eval(Operator::Modulus, 7_i64, 3_i64), Value::Int(1));
    assert_eq!(eval(Operator::Power, 2_i64, 10_i64), Value::Int(1024));
}

#[test]
fn division_and_mixed_operands_produce_floats() {
    assert_eq!(eval(Operator::Divide, 7_i64, 2_i64), Value::Float(3.5));
    assert_eq!(eval(Operator::Add, 1_i64, 0.5), Value::Float(1.5));
    assert_eq!(eval(Operator::Power, 2_i64, -1_i64), Value::Float(0.5));
}

#[test]
fn overflow_promotes_to_float() {
    let Value::Float(n) = eval(Operator::Multiply, i64::MAX, 2_i64) else {
        panic!("expected a float");
    };
    assert!(n > 1e18);
}

#[test]
fn zero_divisors_are_errors() {
    assert_eq!(error(Operator::Divide, 1_i64, 0_i64), "division by zero");
    assert_eq!(error(Operator::Modulus, 1_i64, 0_i64), "modulus by zero");
    assert_eq!(error(Operator::Divide, 1.0, 0.0), "division by zero");
}

#[test]
fn plus_concatenates_when_a_string_is_involved() {
    assert_eq!(eval(Operator::Add, "a", 1_i64), Value::str("a1"));
    assert_eq!(eval(Operator::Add, true, "!"), Value::str("True!"));
    assert_eq!(
        error(Operator::Add, true, 1_i64),
        "cannot apply '+' to bool and int"
    );
}

#[test]
fn string_repetition() {
    assert_eq!(eval(Operator::Multiply, "ab", 2.5), Value::str("ababa"));
    assert_eq!(eval(Operator::Multiply, 3_i64, "x"), Value::str("xxx"));
    assert_eq!(eval(Operator::Multiply, "ab", -1_i64), Value::str(""));
    assert_eq!(eval(Operator::Multiply, "abcd", 0.25), Value::str("a"));
    assert_eq!(
        error(Operator::Multiply, "ab", "cd"),
        "cannot apply '*' to string and string"
    );
}

#[test]
fn repetition_is_bounded() {
    assert_eq!(
        error(Operator::Multiply, "ab", 1e12),
        "string repetition of 16777216 characters is too large"
    );
}

#[test]
fn modulus_formats_strings() {
    assert_eq!(
        eval(Operator::Modulus, "{0}-{1}", Value::List(vec![Value::Int(1), Value::Int(2)])),
        Value::str("1-2")
    );
    assert_eq!(eval(Operator::Modulus, "<{0}>", 5_i64), Value::str("<5>"));
}

#[test]
fn non_numeric_arithmetic() {
    assert_eq!(
        error(Operator::Subtract, "a", 1_i64),
        "'-' needs numbers, found string"
    );
}

#[test]
fn comparisons() {
    assert_eq!(eval(Operator::Less, 1_i64, 2_i64), Value::Bool(true));
    assert_eq!(eval(Operator::Equal, 1_i64, 1.0), Value::Bool(true));
    assert_eq!(eval(Operator::GreaterEq, "b", "a"), Value::Bool(true));
    assert_eq!(eval(Operator::NotEqual, true, false), Value::Bool(true));
    assert_eq!(eval(Operator::Equal, Value::Null, Value::Null), Value::Bool(true));
}

#[test]
fn comparison_type_errors() {
    assert_eq!(
        error(Operator::Less, "a", 1_i64),
        "cannot apply '<' to string and int"
    );
    assert_eq!(
        error(Operator::Less, true, false),
        "values of type bool cannot be compared with '<'"
    );
}

#[test]
fn logical_operators_use_truthiness() {
    assert_eq!(eval(Operator::And, 1_i64, "x"), Value::Bool(true));
    assert_eq!(eval(Operator::And, 1_i64, ""), Value::Bool(false));
    assert_eq!(eval(Operator::Or, Value::Null, 0.0), Value::Bool(false));
    assert_eq!(eval(Operator::Or, Value::List(Vec::new()), false), Value::Bool(true));
}

#[test]
fn not_flips_booleans_only() {
    assert_eq!(evaluate_not(Value::Bool(true)), Value::Bool(false));
    assert_eq!(evaluate_not(Value::Int(0)), Value::Int(0));
}
