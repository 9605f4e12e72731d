//! Numeric views and truth tests over values.

use crate::Value;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss, reason = "integral operands widen like the host numbers do")]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(n) => n == 0.0,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(n) => Value::Int(n),
            Number::Float(n) => Value::Float(n),
        }
    }
}

/// Integers and floats are numeric; nothing else converts.
pub fn as_number(value: &Value) -> Option<Number> {
    match *value {
        Value::Int(n) => Some(Number::Int(n)),
        Value::Float(n) => Some(Number::Float(n)),
        _ => None,
    }
}

/// Truth value used by `&&` and `||`.
///
/// Null, the empty string, zero and `False` are false; every other value is
/// true.
pub fn truthiness(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Str(s) => !s.is_empty(),
        Value::Int(_) | Value::Float(_) => as_number(value).is_some_and(|n| !n.is_zero()),
        _ => true,
    }
}

/// Whether an `if` condition holds: only a non-empty string, `True` or a
/// nonzero number does.
pub fn condition_holds(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Str(s) => !s.is_empty(),
        Value::Int(_) | Value::Float(_) => as_number(value).is_some_and(|n| !n.is_zero()),
        _ => false,
    }
}
