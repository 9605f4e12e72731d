//! Runtime values produced by resolution.

use std::fmt;
use std::rc::Rc;

use crate::scope::Scope;
use crate::stack::ensure_sufficient_stack;

/// A host object reachable from a scope.
pub type HostObject = Rc<dyn Scope>;

/// A resolved value.
///
/// Lists may nest as deeply as the input brackets do. Cloning, comparing and
/// printing recurse under the stack guard, and dropping is iterative.
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(HostObject),
    /// A member that could not be read but might be invoked, waiting for its
    /// argument list.
    Invocation { target: HostObject, name: String },
    /// Source text that failed to resolve or was deliberately left alone.
    Unresolved(String),
}

impl Value {
    pub fn str(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Invocation { .. } => "invocation",
            Value::Unresolved(_) => "unresolved",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Value::Unresolved(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Zero terms become null, one term stands for itself, more form a list.
    pub fn collapse(mut terms: Vec<Value>) -> Value {
        match terms.len() {
            0 => Value::Null,
            1 => terms.pop().unwrap_or(Value::Null),
            _ => Value::List(terms),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(n) => Value::Int(*n),
            Value::Float(n) => Value::Float(*n),
            Value::Str(s) => Value::Str(s.clone()),
            Value::List(items) => ensure_sufficient_stack(|| Value::List(items.clone())),
            Value::Object(object) => Value::Object(Rc::clone(object)),
            Value::Invocation { target, name } => Value::Invocation {
                target: Rc::clone(target),
                name: name.clone(),
            },
            Value::Unresolved(text) => Value::Unresolved(text.clone()),
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let Value::List(items) = self else {
            return;
        };
        if !items.iter().any(|item| matches!(item, Value::List(_))) {
            return;
        }
        // Unnest onto a work list so each dropped value holds only
        // non-list children.
        let mut pending = std::mem::take(items);
        while let Some(mut value) = pending.pop() {
            if let Value::List(inner) = &mut value {
                pending.append(inner);
            }
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "structural equality, not numeric comparison")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) | (Value::Unresolved(a), Value::Unresolved(b)) => {
                a == b
            }
            (Value::List(a), Value::List(b)) => ensure_sufficient_stack(|| a == b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (
                Value::Invocation { target: a, name: x },
                Value::Invocation { target: b, name: y },
            ) => Rc::ptr_eq(a, b) && x == y,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => {
                ensure_sufficient_stack(|| f.debug_tuple("List").field(items).finish())
            }
            Value::Object(_) => write!(f, "Object"),
            Value::Invocation { name, .. } => write!(f, "Invocation({name:?})"),
            Value::Unresolved(text) => write!(f, "Unresolved({text:?})"),
        }
    }
}

/// The text a value contributes to concatenation and formatting.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) | Value::Unresolved(s) => f.write_str(s),
            Value::List(items) => ensure_sufficient_stack(|| {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }),
            Value::Object(_) => write!(f, "<object>"),
            Value::Invocation { name, .. } => write!(f, "<call {name}>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<weft_ir::Literal> for Value {
    fn from(literal: weft_ir::Literal) -> Self {
        match literal {
            weft_ir::Literal::Int(n) => Value::Int(n),
            weft_ir::Literal::Float(n) => Value::Float(n),
            weft_ir::Literal::Bool(b) => Value::Bool(b),
            weft_ir::Literal::Str(s) => Value::Str(s),
        }
    }
}

#[cfg(test)]
mod tests;
