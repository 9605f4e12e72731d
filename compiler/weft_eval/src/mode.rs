//! Full or partial resolution.

use weft_ir::Operator;

/// What kind of term the resolver is about to descend into.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TermKind {
    /// Plain text outside a text literal, looked up in the scope.
    Name,
    /// A number, boolean, escape or text literal.
    Literal,
    /// A bracketed or braced group.
    Group,
    Operator(Operator),
    /// Stray delimiters and anything else.
    Other,
}

/// A term about to be resolved.
#[derive(Copy, Clone, Debug)]
pub struct Progress<'f> {
    pub text: &'f str,
    pub kind: TermKind,
}

#[derive(Copy, Clone, Default)]
pub enum ResolutionMode<'p> {
    #[default]
    Full,
    /// Terms the predicate accepts are left as `Value::Unresolved` with
    /// their source text, without descending into them.
    Partial(&'p dyn Fn(&Progress<'_>) -> bool),
}

impl ResolutionMode<'_> {
    #[inline]
    pub fn stops_at(&self, progress: &Progress<'_>) -> bool {
        match self {
            ResolutionMode::Full => false,
            ResolutionMode::Partial(stop) => stop(progress),
        }
    }
}

impl std::fmt::Debug for ResolutionMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionMode::Full => write!(f, "Full"),
            ResolutionMode::Partial(_) => write!(f, "Partial"),
        }
    }
}
