//! Delimiter specifications.
//!
//! A delimiter is one lexical boundary: a literal symbol, optionally
//! narrowed by a match predicate and optionally followed by a scan rule
//! that consumes more input and may substitute a literal value.

use std::cmp::Ordering;

use bitflags::bitflags;
use weft_ir::{Literal, Operator};

/// Outcome of a scan rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Scan {
    /// Bytes consumed from the delimiter start, delimiter text included.
    pub consumed: usize,
    /// Literal to substitute for the token.
    pub value: Option<Literal>,
    pub error: Option<ScanError>,
}

impl Scan {
    pub fn value(consumed: usize, value: Literal) -> Self {
        Scan {
            consumed,
            value: Some(value),
            error: None,
        }
    }

    pub fn plain(consumed: usize) -> Self {
        Scan {
            consumed,
            value: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, offset: usize, len: usize, message: impl Into<String>) -> Self {
        self.error = Some(ScanError {
            offset,
            len,
            message: message.into(),
        });
        self
    }
}

/// Error raised by a scan rule, positioned relative to the delimiter start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub offset: usize,
    pub len: usize,
    pub message: String,
}

/// `(text, index) -> Scan`, where `index` is the delimiter start.
pub type ScanRule = fn(&str, usize) -> Scan;

/// Extra match condition evaluated after the literal matched.
pub type MatchPredicate = fn(&str, usize) -> bool;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct DelimFlags: u8 {
        /// Shown when a tree is rendered back to text.
        const PRINTABLE = 1 << 0;
        /// Recognised even while a plain-text token is in progress.
        const BREAKING = 1 << 1;
        /// Opens its context.
        const OPENS = 1 << 2;
        /// Closes its context when that context is innermost.
        const CLOSES = 1 << 3;
        /// Separates list items; never an operand, never a term.
        const SEPARATOR = 1 << 4;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelimRole {
    Plain,
    /// Belongs to the named context; opening/closing is in the flags.
    Context(String),
    Operator { operator: Operator, precedence: u16 },
}

#[derive(Clone, Debug)]
pub struct DelimiterSpec {
    pub text: String,
    pub name: String,
    pub description: Option<String>,
    pub scan: Option<ScanRule>,
    pub predicate: Option<MatchPredicate>,
    pub flags: DelimFlags,
    pub role: DelimRole,
}

impl DelimiterSpec {
    /// Breaking, printable delimiter named after its own text.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        DelimiterSpec {
            name: text.clone(),
            text,
            description: None,
            scan: None,
            predicate: None,
            flags: DelimFlags::PRINTABLE | DelimFlags::BREAKING,
            role: DelimRole::Plain,
        }
    }

    /// Delimiter tied to a context; chain `.opening()` / `.closing()`.
    pub fn context(text: impl Into<String>, context: impl Into<String>) -> Self {
        let context = context.into();
        DelimiterSpec {
            name: context.clone(),
            role: DelimRole::Context(context),
            ..Self::plain(text)
        }
    }

    /// Delimiter for `operator` with its default precedence.
    pub fn operator(operator: Operator) -> Self {
        let mut spec = DelimiterSpec {
            name: operator.context_name().to_owned(),
            role: DelimRole::Operator {
                operator,
                precedence: operator.precedence(),
            },
            ..Self::plain(operator.symbol())
        };
        if !operator.is_breaking() {
            spec.flags.remove(DelimFlags::BREAKING);
        }
        spec
    }

    #[must_use]
    pub fn opening(mut self) -> Self {
        self.flags.insert(DelimFlags::OPENS);
        self
    }

    #[must_use]
    pub fn closing(mut self) -> Self {
        self.flags.insert(DelimFlags::CLOSES);
        self
    }

    #[must_use]
    pub fn separator(mut self) -> Self {
        self.flags.insert(DelimFlags::SEPARATOR);
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn scan_with(mut self, rule: ScanRule) -> Self {
        self.scan = Some(rule);
        self
    }

    #[must_use]
    pub fn when(mut self, predicate: MatchPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    #[must_use]
    pub fn non_breaking(mut self) -> Self {
        self.flags.remove(DelimFlags::BREAKING);
        self
    }

    #[must_use]
    pub fn non_printable(mut self) -> Self {
        self.flags.remove(DelimFlags::PRINTABLE);
        self
    }

    #[must_use]
    pub fn with_precedence(mut self, order: u16) -> Self {
        if let DelimRole::Operator { precedence, .. } = &mut self.role {
            *precedence = order;
        }
        self
    }

    // === Queries ===

    /// True iff the literal matches at `index` and the predicate, if any,
    /// holds there too.
    pub fn is_at(&self, text: &str, index: usize) -> bool {
        text.get(index..)
            .is_some_and(|rest| rest.starts_with(self.text.as_str()))
            && self.predicate.map_or(true, |p| p(text, index))
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    #[inline]
    pub fn is_breaking(&self) -> bool {
        self.flags.contains(DelimFlags::BREAKING)
    }

    #[inline]
    pub fn is_printable(&self) -> bool {
        self.flags.contains(DelimFlags::PRINTABLE)
    }

    #[inline]
    pub fn opens(&self) -> bool {
        self.flags.contains(DelimFlags::OPENS)
    }

    #[inline]
    pub fn closes(&self) -> bool {
        self.flags.contains(DelimFlags::CLOSES)
    }

    #[inline]
    pub fn is_separator(&self) -> bool {
        self.flags.contains(DelimFlags::SEPARATOR)
    }

    pub fn context_name(&self) -> Option<&str> {
        match &self.role {
            DelimRole::Context(name) => Some(name),
            _ => None,
        }
    }

    pub fn operator_info(&self) -> Option<(Operator, u16)> {
        match self.role {
            DelimRole::Operator {
                operator,
                precedence,
            } => Some((operator, precedence)),
            _ => None,
        }
    }

    /// Table order among delimiters: by text, character by character; at a
    /// shared prefix the longer literal first; for equal text the one with a
    /// predicate first, then contexts, then operators, then plain.
    pub fn table_order(&self, other: &DelimiterSpec) -> Ordering {
        for (a, b) in self.text.chars().zip(other.text.chars()) {
            if a != b {
                return a.cmp(&b);
            }
        }
        other
            .text
            .len()
            .cmp(&self.text.len())
            .then_with(|| other.predicate.is_some().cmp(&self.predicate.is_some()))
            .then_with(|| self.role_rank().cmp(&other.role_rank()))
    }

    fn role_rank(&self) -> u8 {
        match self.role {
            DelimRole::Context(_) => 0,
            DelimRole::Operator { .. } => 1,
            DelimRole::Plain => 2,
        }
    }
}

#[cfg(test)]
mod tests;
