//! Diagnostics for the weft pipeline.
//!
//! Every stage reports into one [`ErrorLog`]: the lexer (malformed literals,
//! unterminated contexts), the operator pass (missing operands, unexpected
//! separators) and the evaluator (unresolved names, bad operands). Each
//! entry carries its byte offset plus 1-based row and column, computed from
//! a [`LineOffsetTable`] built once per source.

mod error;
mod line_table;
mod log;

pub use error::{ErrorCategory, ParseError};
pub use line_table::LineOffsetTable;
pub use log::{ErrorLog, ErrorMark};
