//! Positioned error values.

use std::fmt;

use weft_ir::Span;

/// Which stage raised an error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    /// Malformed literal or unterminated context.
    Lex,
    /// Unexpected separator or missing operator operand.
    Structure,
    /// Unresolved name, bad operand types, failed invocation.
    Resolution,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Lex => "lex",
            ErrorCategory::Structure => "structure",
            ErrorCategory::Resolution => "resolution",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem: WHERE (span, row, col) plus WHAT (category, message).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    pub span: Span,
    /// 1-based.
    pub row: u32,
    /// 1-based, in characters.
    pub col: u32,
    pub category: ErrorCategory,
    pub message: String,
}

impl ParseError {
    /// Byte offset of the error.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.span.start
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{},{}({}): {}",
            self.row, self.col, self.span.start, self.message
        )
    }
}

impl std::error::Error for ParseError {}
