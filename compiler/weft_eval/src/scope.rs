//! The host side of resolution: where names are looked up and invoked.
//!
//! Resolution never reflects over host types. Everything it can reach goes
//! through the three methods of [`Scope`], and each of them reports absence
//! instead of failing.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::Value;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("no function named '{0}'")]
    NotFound(String),
    #[error("'{name}' takes {expected} argument(s) but {got} were given")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{0}")]
    Failed(String),
}

/// Name lookup, assignment and invocation on a host object.
pub trait Scope {
    fn try_get_member(&self, name: &str) -> Option<Value>;

    /// Returns `false` if the member does not exist or cannot be written.
    fn try_set_member(&self, name: &str, value: Value) -> bool;

    fn try_invoke(&self, name: &str, args: &[Value]) -> Result<Value, InvokeError>;
}

/// A scope with nothing in it.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyScope;

impl Scope for EmptyScope {
    fn try_get_member(&self, _name: &str) -> Option<Value> {
        None
    }

    fn try_set_member(&self, _name: &str, _value: Value) -> bool {
        false
    }

    fn try_invoke(&self, name: &str, _args: &[Value]) -> Result<Value, InvokeError> {
        Err(InvokeError::NotFound(name.to_owned()))
    }
}

type HostFn = Box<dyn Fn(&[Value]) -> Result<Value, InvokeError>>;

struct Function {
    /// `None` accepts any number of arguments.
    arity: Option<usize>,
    call: HostFn,
}

/// A scope backed by maps of values and closures.
///
/// Members can be written through [`Scope::try_set_member`] even when they
/// did not exist before.
#[derive(Default)]
pub struct MapScope {
    members: RefCell<FxHashMap<String, Value>>,
    functions: FxHashMap<String, Function>,
}

impl MapScope {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.borrow_mut().insert(name.into(), value.into());
        self
    }

    /// Register a function taking exactly `arity` arguments.
    #[must_use]
    pub fn function(
        mut self,
        name: impl Into<String>,
        arity: usize,
        call: impl Fn(&[Value]) -> Result<Value, InvokeError> + 'static,
    ) -> Self {
        self.functions.insert(
            name.into(),
            Function {
                arity: Some(arity),
                call: Box::new(call),
            },
        );
        self
    }

    #[must_use]
    pub fn variadic(
        mut self,
        name: impl Into<String>,
        call: impl Fn(&[Value]) -> Result<Value, InvokeError> + 'static,
    ) -> Self {
        self.functions.insert(
            name.into(),
            Function {
                arity: None,
                call: Box::new(call),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.members.borrow().get(name).cloned()
    }
}

impl Scope for MapScope {
    fn try_get_member(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn try_set_member(&self, name: &str, value: Value) -> bool {
        self.members.borrow_mut().insert(name.to_owned(), value);
        true
    }

    fn try_invoke(&self, name: &str, args: &[Value]) -> Result<Value, InvokeError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| InvokeError::NotFound(name.to_owned()))?;
        if let Some(expected) = function.arity {
            if expected != args.len() {
                return Err(InvokeError::ArgumentCount {
                    name: name.to_owned(),
                    expected,
                    got: args.len(),
                });
            }
        }
        tracing::trace!(name, args = args.len(), "invoke");
        (function.call)(args)
    }
}

impl fmt::Debug for MapScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members = self.members.borrow();
        let mut names: Vec<&str> = members.keys().map(String::as_str).collect();
        names.sort_unstable();
        let mut functions: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        functions.sort_unstable();
        f.debug_struct("MapScope")
            .field("members", &names)
            .field("functions", &functions)
            .finish()
    }
}
