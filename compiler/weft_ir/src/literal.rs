//! Values substituted for delimiter tokens by scan rules.

use std::fmt;

/// A value produced while lexing: a parsed number, an unescaped character
/// sequence, or a boolean keyword.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Str(s) => f.write_str(s),
        }
    }
}
