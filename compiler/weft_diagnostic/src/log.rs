//! The shared error log.

use std::fmt::Write;
use std::sync::Arc;

use weft_ir::Span;

use crate::{ErrorCategory, LineOffsetTable, ParseError};

/// Position in the log to roll back to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ErrorMark(usize);

/// Accumulates errors for one source text, in report order.
#[derive(Clone, Debug)]
pub struct ErrorLog {
    source: Arc<str>,
    lines: LineOffsetTable,
    errors: Vec<ParseError>,
}

impl ErrorLog {
    pub fn new(source: Arc<str>) -> Self {
        let lines = LineOffsetTable::build(&source);
        ErrorLog {
            source,
            lines,
            errors: Vec::new(),
        }
    }

    /// Record an error at `span`, computing its row and column.
    pub fn push(&mut self, category: ErrorCategory, span: Span, message: impl Into<String>) {
        let (row, col) = self.lines.offset_to_line_col(&self.source, span.start);
        let error = ParseError {
            span,
            row,
            col,
            category,
            message: message.into(),
        };
        tracing::debug!(%error, %category, "error reported");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn count(&self, category: ErrorCategory) -> usize {
        self.errors
            .iter()
            .filter(|e| e.category == category)
            .count()
    }

    pub fn lines(&self) -> &LineOffsetTable {
        &self.lines
    }

    /// Remember the current length so later errors can be dropped.
    pub fn mark(&self) -> ErrorMark {
        ErrorMark(self.errors.len())
    }

    /// Drop every error reported after `mark`.
    pub fn rollback(&mut self, mark: ErrorMark) {
        self.errors.truncate(mark.0);
    }

    /// Move all errors of `other` into this log.
    pub fn absorb(&mut self, other: ErrorLog) {
        self.errors.extend(other.errors);
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Render every error with its source line and a caret under the span.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            let _ = writeln!(out, "error[{}]: {}", error.category, error.message);
            let _ = writeln!(out, " --> {}:{}", error.row, error.col);
            if let Some(line) = self.lines.line_text(&self.source, error.row) {
                let gutter = error.row.to_string();
                let pad = " ".repeat(gutter.len());
                let width = self.caret_width(error, line);
                let _ = writeln!(out, "{pad} |");
                let _ = writeln!(out, "{gutter} | {line}");
                let _ = writeln!(
                    out,
                    "{pad} | {}{}",
                    " ".repeat(error.col as usize - 1),
                    "^".repeat(width)
                );
            }
        }
        out
    }

    /// Carets cover the span's characters on the error's line, at least one.
    fn caret_width(&self, error: &ParseError, line: &str) -> usize {
        let rest = line.chars().count().saturating_sub(error.col as usize - 1);
        let spanned = self
            .source
            .get(error.span.to_range())
            .map_or(0, |text| text.lines().next().unwrap_or("").chars().count());
        spanned.min(rest).max(1)
    }
}

#[cfg(test)]
mod tests;
