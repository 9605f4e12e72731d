//! Operator resolution for weft.
//!
//! Lexing leaves operator delimiters as flat tokens. [`parse`] lexes and then
//! rewrites every operator and its operands into an operator node, so the
//! forest handed to the evaluator is fully grouped.
//!
//! Grouping rules:
//!
//! - innermost lists are resolved before the lists containing them
//! - within a list, lower precedence numbers bind tighter
//! - operators of equal precedence group from the right

mod parse_error;
mod resolver;

use weft_diagnostic::ErrorLog;
use weft_ir::{Forest, RuleSetId};
use weft_lexer::{LexOutput, RuleSetTable};

pub use resolver::OperatorResolver;

/// A grouped forest plus every error raised while building it.
#[derive(Debug)]
pub struct ParseOutput {
    pub forest: Forest,
    pub errors: ErrorLog,
}

impl ParseOutput {
    /// Resolve operators in an already lexed forest.
    pub fn from_lex(table: &RuleSetTable, lexed: LexOutput) -> Self {
        let LexOutput {
            mut forest,
            mut errors,
        } = lexed;
        resolve_operators(table, &mut forest, &mut errors);
        ParseOutput { forest, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and group `source` with the built-in default grammar.
pub fn parse(source: &str) -> ParseOutput {
    let table = RuleSetTable::builtin();
    parse_with(table, source, table.default_rules())
}

/// Lex and group `source` with an explicit table and starting rule set.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_with(table: &RuleSetTable, source: &str, rules: RuleSetId) -> ParseOutput {
    ParseOutput::from_lex(table, weft_lexer::lex_with(table, source, rules))
}

/// Collapse every operator delimiter in `forest` into an operator node.
///
/// Operators with a missing or separator operand are reported as structure
/// errors and left in place as plain delimiter tokens.
pub fn resolve_operators(table: &RuleSetTable, forest: &mut Forest, errors: &mut ErrorLog) {
    OperatorResolver::new(table, forest, errors).run();
}
