//! Context-sensitive lexer for weft.
//!
//! Grammars are tables of [`DelimiterSpec`]s grouped into named
//! [`RuleSet`]s inside a [`RuleSetTable`]. The [`Lexer`] scans text against
//! the table, opening and closing contexts as their delimiters appear, and
//! builds a [`weft_ir::Forest`].
//!
//! # Architecture
//!
//! - [`delimiter`]: one lexical boundary and its match rules
//! - [`rules`]: sorted, indexed delimiter tables; fallbacks; simplify kinds
//! - [`grammar`]: the built-in `default` and `command line` grammars
//! - [`scan`]: scan rules for numbers, escapes and booleans
//! - `lexer`: the resumable step machine

pub mod delimiter;
pub mod grammar;
pub mod lex_error;
mod lexer;
pub mod rules;
pub mod scan;

pub use delimiter::{DelimFlags, DelimRole, DelimiterSpec, MatchPredicate, Scan, ScanError, ScanRule};
pub use lexer::{first_word, lex, lex_with, LexOutput, LexProgress, LexState, Lexer};
pub use rules::{RuleSet, RuleSetDef, RuleSetError, RuleSetTable, Simplify};
