//! Value semantics of the binary operators.
//!
//! Operands arrive fully resolved and never unresolved; the resolver handles
//! membership, `if`, `maybe` and unresolved propagation itself. Dispatch is a
//! plain match on the operator and the operand pair.

use std::cmp::Ordering;

use weft_ir::Operator;

use crate::convert::{as_number, truthiness, Number};
use crate::errors::{
    division_by_zero, modulo_by_zero, not_an_operator, not_numeric, not_ordered,
    repetition_too_large, type_mismatch, ResolveResult,
};
use crate::format::format_positional;
use crate::Value;

/// Longest string `*` may build, in characters.
const MAX_REPEAT_LEN: usize = 1 << 24;

pub fn evaluate_binary(op: Operator, left: &Value, right: &Value) -> ResolveResult {
    match op {
        Operator::Add => add(left, right),
        Operator::Multiply => multiply(left, right),
        Operator::Modulus if matches!(left, Value::Str(_)) => format(left, right),
        Operator::Subtract | Operator::Divide | Operator::Modulus | Operator::Power => {
            let (a, b) = numeric_pair(op, left, right)?;
            arithmetic(op, a, b)
        }
        Operator::And => Ok(Value::Bool(truthiness(left) && truthiness(right))),
        Operator::Or => Ok(Value::Bool(truthiness(left) || truthiness(right))),
        _ if op.is_comparison() => compare(op, left, right),
        _ => Err(not_an_operator(op)),
    }
}

/// `not`: booleans flip, everything else passes through.
pub fn evaluate_not(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(!b),
        other => other,
    }
}

fn numeric_pair(op: Operator, left: &Value, right: &Value) -> ResolveResult<(Number, Number)> {
    let a = as_number(left).ok_or_else(|| not_numeric(op, left.type_name()))?;
    let b = as_number(right).ok_or_else(|| not_numeric(op, right.type_name()))?;
    Ok((a, b))
}

fn add(left: &Value, right: &Value) -> ResolveResult {
    if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
        return arithmetic(Operator::Add, a, b);
    }
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::Str(format!("{left}{right}")));
    }
    Err(type_mismatch(Operator::Add, left.type_name(), right.type_name()))
}

fn multiply(left: &Value, right: &Value) -> ResolveResult {
    match (left, right) {
        (Value::Str(s), other) | (other, Value::Str(s)) => {
            let n = as_number(other).ok_or_else(|| {
                type_mismatch(Operator::Multiply, left.type_name(), right.type_name())
            })?;
            repeat(s, n.as_f64()).map(Value::Str)
        }
        _ => {
            let (a, b) = numeric_pair(Operator::Multiply, left, right)?;
            arithmetic(Operator::Multiply, a, b)
        }
    }
}

/// `floor(times)` copies of `s`, then a prefix of `s` covering the
/// fractional part.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "counts are bounded by MAX_REPEAT_LEN before conversion"
)]
fn repeat(s: &str, times: f64) -> ResolveResult<String> {
    if times.is_nan() || times <= 0.0 || s.is_empty() {
        return Ok(String::new());
    }
    let chars = s.chars().count();
    let whole = times.floor();
    if whole * chars as f64 > MAX_REPEAT_LEN as f64 {
        return Err(repetition_too_large(MAX_REPEAT_LEN));
    }
    let mut out = s.repeat(whole as usize);
    let partial = ((times - whole) * chars as f64).round() as usize;
    out.extend(s.chars().take(partial));
    Ok(out)
}

fn format(left: &Value, right: &Value) -> ResolveResult {
    let Value::Str(pattern) = left else {
        return Err(type_mismatch(Operator::Modulus, left.type_name(), right.type_name()));
    };
    let text = match right {
        Value::List(args) => format_positional(pattern, args)?,
        single => format_positional(pattern, std::slice::from_ref(single))?,
    };
    Ok(Value::Str(text))
}

/// Integral operands stay integral unless the result overflows or the
/// operator is `/`.
fn arithmetic(op: Operator, a: Number, b: Number) -> ResolveResult {
    if let (Number::Int(x), Number::Int(y)) = (a, b) {
        let exact = match op {
            Operator::Add => x.checked_add(y),
            Operator::Subtract => x.checked_sub(y),
            Operator::Multiply => x.checked_mul(y),
            Operator::Modulus if y == 0 => return Err(modulo_by_zero()),
            Operator::Modulus => x.checked_rem(y),
            Operator::Power => u32::try_from(y).ok().and_then(|e| x.checked_pow(e)),
            _ => None,
        };
        if let Some(n) = exact {
            return Ok(Value::Int(n));
        }
    }
    let (x, y) = (a.as_f64(), b.as_f64());
    let result = match op {
        Operator::Add => x + y,
        Operator::Subtract => x - y,
        Operator::Multiply => x * y,
        Operator::Divide if b.is_zero() => return Err(division_by_zero()),
        Operator::Divide => x / y,
        Operator::Modulus if b.is_zero() => return Err(modulo_by_zero()),
        Operator::Modulus => x % y,
        Operator::Power => x.powf(y),
        _ => return Err(not_an_operator(op)),
    };
    Ok(Value::Float(result))
}

fn compare(op: Operator, left: &Value, right: &Value) -> ResolveResult {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let (a, b) = numeric_pair(op, left, right)?;
            a.as_f64().partial_cmp(&b.as_f64())
        }
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) if is_equality(op) => Some(a.cmp(b)),
        (Value::Null, Value::Null) if is_equality(op) => Some(Ordering::Equal),
        _ if std::mem::discriminant(left) == std::mem::discriminant(right) => {
            return Err(not_ordered(op, left.type_name()));
        }
        _ => return Err(type_mismatch(op, left.type_name(), right.type_name())),
    };
    let holds = match op {
        Operator::Less => ordering == Some(Ordering::Less),
        Operator::Greater => ordering == Some(Ordering::Greater),
        Operator::LessEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Operator::GreaterEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        Operator::Equal => ordering == Some(Ordering::Equal),
        Operator::NotEqual => ordering != Some(Ordering::Equal),
        _ => return Err(not_an_operator(op)),
    };
    Ok(Value::Bool(holds))
}

fn is_equality(op: Operator) -> bool {
    matches!(op, Operator::Equal | Operator::NotEqual)
}

#[cfg(test)]
mod tests;
