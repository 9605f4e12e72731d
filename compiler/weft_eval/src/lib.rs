//! Resolution of weft expressions to values.
//!
//! [`evaluate`] runs the whole pipeline: lex, group operators, then walk the
//! forest with a [`Resolver`] against a host [`Scope`]. Hosts that keep the
//! forest around can build a `Resolver` themselves.
//!
//! # Modules
//!
//! - [`value`]: the `Value` enum
//! - [`scope`]: the host capability trait and a map-backed implementation
//! - [`mode`]: full or partial resolution
//! - [`operators`]: operator semantics over resolved operands
//! - [`errors`]: resolution error constructors

mod convert;
pub mod errors;
mod format;
pub mod mode;
pub mod operators;
mod resolver;
pub mod scope;
mod stack;
pub mod value;

use weft_diagnostic::ErrorLog;
use weft_ir::RuleSetId;
use weft_lexer::RuleSetTable;
use weft_parse::ParseOutput;

pub use convert::{condition_holds, truthiness};
pub use errors::{ResolveError, ResolveResult};
pub use format::format_positional;
pub use mode::{Progress, ResolutionMode, TermKind};
pub use resolver::Resolver;
pub use scope::{EmptyScope, InvokeError, MapScope, Scope};
pub use stack::ensure_sufficient_stack;
pub use value::{HostObject, Value};

/// A resolved value plus every error raised on the way.
#[derive(Debug)]
pub struct Evaluation {
    pub value: Value,
    pub errors: ErrorLog,
}

/// Evaluate `source` with the built-in default grammar.
pub fn evaluate(source: &str, scope: &dyn Scope) -> Evaluation {
    let table = RuleSetTable::builtin();
    evaluate_with(table, source, table.default_rules(), scope, ResolutionMode::Full)
}

#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn evaluate_with(
    table: &RuleSetTable,
    source: &str,
    rules: RuleSetId,
    scope: &dyn Scope,
    mode: ResolutionMode<'_>,
) -> Evaluation {
    let ParseOutput { forest, mut errors } = weft_parse::parse_with(table, source, rules);
    let value = Resolver::new(table, &forest, &mut errors, scope)
        .with_mode(mode)
        .resolve();
    Evaluation { value, errors }
}
