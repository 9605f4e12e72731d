//! Lexer error messages.
//!
//! Kept in one place so tests and hosts can match on the wording.

/// A context opened by `open` reached end of input.
pub fn missing_closing_token(open: &str) -> String {
    format!("missing closing token after '{open}'")
}

/// A closing delimiter with no matching open context.
pub fn unexpected_closer(text: &str) -> String {
    format!("unexpected '{text}' with no open context to close")
}

/// A context delimiter names a rule set the table does not have.
pub fn unknown_context(name: &str) -> String {
    format!("context '{name}' does not exist")
}

pub fn source_too_large(len: usize) -> String {
    format!("source text of {len} bytes exceeds the 4 GiB limit")
}
