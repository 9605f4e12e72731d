//! Resolution error constructors.
//!
//! Every resolution failure is created here so messages stay uniform.

use thiserror::Error;
use weft_ir::Operator;

use crate::scope::InvokeError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResolveError {
    pub message: String,
}

impl ResolveError {
    pub fn new(message: impl Into<String>) -> Self {
        ResolveError {
            message: message.into(),
        }
    }
}

pub type ResolveResult<T = crate::Value> = Result<T, ResolveError>;

// Operators

pub fn type_mismatch(op: Operator, left: &str, right: &str) -> ResolveError {
    ResolveError::new(format!(
        "cannot apply '{}' to {left} and {right}",
        op.symbol()
    ))
}

pub fn not_numeric(op: Operator, type_name: &str) -> ResolveError {
    ResolveError::new(format!(
        "'{}' needs numbers, found {type_name}",
        op.symbol()
    ))
}

pub fn not_ordered(op: Operator, type_name: &str) -> ResolveError {
    ResolveError::new(format!(
        "values of type {type_name} cannot be compared with '{}'",
        op.symbol()
    ))
}

pub fn division_by_zero() -> ResolveError {
    ResolveError::new("division by zero")
}

pub fn modulo_by_zero() -> ResolveError {
    ResolveError::new("modulus by zero")
}

pub fn repetition_too_large(len: usize) -> ResolveError {
    ResolveError::new(format!("string repetition of {len} characters is too large"))
}

pub fn not_an_operator(op: Operator) -> ResolveError {
    ResolveError::new(format!("'{}' is not a binary value operator", op.symbol()))
}

// Members and invocation

pub fn no_member(name: &str, type_name: &str) -> ResolveError {
    ResolveError::new(format!("no member '{name}' on {type_name}"))
}

pub fn member_name_expected(found: &str) -> ResolveError {
    ResolveError::new(format!("member name expected, found '{found}'"))
}

pub fn invoke_failed(error: &InvokeError) -> ResolveError {
    ResolveError::new(error.to_string())
}

// Formatting

pub fn format_index(index: usize, count: usize) -> ResolveError {
    ResolveError::new(format!(
        "format placeholder {{{index}}} out of range for {count} argument(s)"
    ))
}

pub fn bad_placeholder(text: &str) -> ResolveError {
    ResolveError::new(format!("malformed format placeholder '{{{text}}}'"))
}

pub fn unterminated_placeholder() -> ResolveError {
    ResolveError::new("unterminated format placeholder")
}

pub fn unmatched_format_brace() -> ResolveError {
    ResolveError::new("unmatched '}' in format string")
}

// Structure

pub fn unexpected_separator(text: &str) -> String {
    format!("unexpected separator '{text}'")
}
