//! The incremental lexer.
//!
//! `Lexer::step` handles exactly one position: a whitespace character, a
//! delimiter (plus whatever its scan rule consumes), or one character of
//! plain text. Driving `step` until `LexState::Finished` gives the same
//! forest and errors as `Lexer::finish`, whatever other work is interleaved.
//!
//! Open contexts live on an explicit stack. Their tokens accumulate at the
//! tail of one pending list; closing a context moves its run of tokens into
//! the forest arena and leaves a single node token behind.

use std::sync::Arc;

use weft_diagnostic::{ErrorCategory, ErrorLog};
use weft_ir::{ContextClass, DelimId, Forest, NewNode, NodeId, RuleSetId, Span, Token, TokenKind};

use crate::delimiter::DelimiterSpec;
use crate::lex_error;
use crate::rules::RuleSetTable;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexState {
    Scanning,
    Finished,
}

/// Snapshot handed to stop conditions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LexProgress {
    /// Byte offset of the next position to scan.
    pub cursor: usize,
    /// Number of open contexts.
    pub depth: usize,
    /// Completed tokens in the root list.
    pub top_level_tokens: usize,
}

/// Result of a lex run.
#[derive(Clone, Debug)]
pub struct LexOutput {
    pub forest: Forest,
    pub errors: ErrorLog,
}

#[derive(Copy, Clone, Debug)]
struct OpenContext {
    node: NodeId,
    rules: RuleSetId,
    begin: DelimId,
    /// Slot of the begin token in `pending`.
    first: usize,
    start: u32,
}

pub struct Lexer<'t> {
    table: &'t RuleSetTable,
    source: Arc<str>,
    default: RuleSetId,
    forest: Forest,
    errors: ErrorLog,
    pending: Vec<Token>,
    stack: Vec<OpenContext>,
    cursor: usize,
    text_start: Option<usize>,
    state: LexState,
}

impl<'t> Lexer<'t> {
    /// Lex `source` starting in `rules`, which also serves as the default
    /// for contexts that do not define their own tables.
    pub fn new(table: &'t RuleSetTable, source: &str, rules: RuleSetId) -> Self {
        let source: Arc<str> = Arc::from(source);
        let mut lexer = Lexer {
            table,
            forest: Forest::new(Arc::clone(&source), rules),
            errors: ErrorLog::new(Arc::clone(&source)),
            source,
            default: rules,
            pending: Vec::new(),
            stack: Vec::new(),
            cursor: 0,
            text_start: None,
            state: LexState::Scanning,
        };
        if u32::try_from(lexer.source.len()).is_err() {
            let message = lex_error::source_too_large(lexer.source.len());
            lexer.errors.push(ErrorCategory::Lex, Span::DUMMY, message);
            lexer.forest.seal(lexer.forest.root(), Vec::new(), None, 0);
            lexer.state = LexState::Finished;
        }
        lexer
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    pub fn progress(&self) -> LexProgress {
        LexProgress {
            cursor: self.cursor,
            depth: self.stack.len(),
            top_level_tokens: self.stack.first().map_or(self.pending.len(), |open| open.first),
        }
    }

    /// Advance by one position.
    pub fn step(&mut self) -> LexState {
        if self.state == LexState::Finished {
            return LexState::Finished;
        }
        let Some(c) = self.source[self.cursor..].chars().next() else {
            self.stop();
            return LexState::Finished;
        };
        let rules = self.current_rules();
        if self.table.is_whitespace(rules, self.default, c) {
            self.flush_text();
            self.cursor += c.len_utf8();
            return LexState::Scanning;
        }
        let found = self.table.find_delimiter(
            rules,
            self.default,
            &self.source,
            self.cursor,
            self.text_start.is_some(),
        );
        match found {
            Some(id) => {
                self.flush_text();
                self.delimiter(id);
            }
            None => {
                self.text_start.get_or_insert(self.cursor);
                self.cursor += c.len_utf8();
            }
        }
        LexState::Scanning
    }

    /// Run to completion.
    pub fn run(&mut self) -> LexState {
        while self.step() == LexState::Scanning {}
        LexState::Finished
    }

    /// Run at most `budget` steps.
    pub fn run_steps(&mut self, budget: usize) -> LexState {
        for _ in 0..budget {
            if self.step() == LexState::Finished {
                break;
            }
        }
        self.state
    }

    /// Step while `keep_going` holds; once it fails the lexer stops at the
    /// current position as if input ended there.
    pub fn run_while(&mut self, mut keep_going: impl FnMut(&LexProgress) -> bool) -> LexState {
        while self.state == LexState::Scanning {
            if !keep_going(&self.progress()) {
                self.stop();
                break;
            }
            self.step();
        }
        self.state
    }

    /// End the run at the current position: flush pending text, force-close
    /// open contexts, seal the root.
    pub fn stop(&mut self) {
        if self.state == LexState::Finished {
            return;
        }
        self.flush_text();
        let end = Span::at(self.cursor, 0).start;

        for open in &self.stack {
            let class = self.table.rule_set(open.rules).class();
            if !class.contains(ContextClass::LINE_COMMENT) {
                let spec = self.table.delimiter(open.begin);
                let span = Span::at(open.start as usize, spec.text.len());
                self.errors.push(
                    ErrorCategory::Lex,
                    span,
                    lex_error::missing_closing_token(&spec.text),
                );
            }
        }
        while let Some(open) = self.stack.pop() {
            let children = self.pending.split_off(open.first);
            self.forest.seal(open.node, children, None, end);
            self.pending
                .push(Token::new(Span::new(open.start, end), TokenKind::Node(open.node)));
        }
        let root = self.forest.root();
        self.forest.seal(root, std::mem::take(&mut self.pending), None, end);
        self.state = LexState::Finished;
        tracing::debug!(
            end,
            nodes = self.forest.node_count(),
            top_level = self.forest.top_level().len(),
            errors = self.errors.len(),
            "lexing finished"
        );
    }

    /// Run to completion and hand over the forest and errors.
    pub fn finish(mut self) -> LexOutput {
        self.run();
        LexOutput {
            forest: self.forest,
            errors: self.errors,
        }
    }

    // === Internals ===

    fn current_rules(&self) -> RuleSetId {
        self.stack.last().map_or(self.default, |open| open.rules)
    }

    fn current_node(&self) -> NodeId {
        self.stack.last().map_or(self.forest.root(), |open| open.node)
    }

    fn flush_text(&mut self) {
        if let Some(start) = self.text_start.take() {
            self.pending
                .push(Token::new(Span::at(start, self.cursor - start), TokenKind::Text));
        }
    }

    fn delimiter(&mut self, id: DelimId) {
        let table = self.table;
        let spec = table.delimiter(id);
        let start = self.cursor;
        let remaining = self.source.len() - start;
        let mut len = spec.text.len();
        let mut literal = None;

        if let Some(scan) = spec.scan {
            let result = scan(&self.source, start);
            len = result.consumed.clamp(1, remaining);
            while !self.source.is_char_boundary(start + len) {
                len += 1;
            }
            if let Some(error) = result.error {
                let span = Span::at(start + error.offset, error.len);
                self.errors.push(ErrorCategory::Lex, span, error.message);
            }
            literal = result.value;
        }
        self.cursor = start + len;
        let span = Span::at(start, len);

        if spec.closes() && self.closes_innermost(spec) {
            self.close(id, span);
            return;
        }
        if spec.opens() {
            self.open(id, spec, span);
            return;
        }
        if spec.closes() {
            self.errors.push(
                ErrorCategory::Structure,
                span,
                lex_error::unexpected_closer(&spec.text),
            );
        }
        let kind = match literal {
            Some(value) => TokenKind::Literal(self.forest.push_literal(value)),
            None => TokenKind::Delimiter(id),
        };
        tracing::trace!(text = %spec.text, %span, "delimiter");
        self.pending.push(Token::new(span, kind));
    }

    fn closes_innermost(&self, spec: &DelimiterSpec) -> bool {
        match (self.stack.last(), spec.context_name()) {
            (Some(open), Some(context)) => self.table.rule_set(open.rules).name() == context,
            _ => false,
        }
    }

    fn open(&mut self, id: DelimId, spec: &DelimiterSpec, span: Span) {
        let Some(rules) = spec.context_name().and_then(|name| self.table.id_of(name)) else {
            let name = spec.context_name().unwrap_or(&spec.name);
            self.errors.push(
                ErrorCategory::Structure,
                span,
                lex_error::unknown_context(name),
            );
            self.pending.push(Token::new(span, TokenKind::Delimiter(id)));
            return;
        };
        let node = self.forest.open_node(NewNode {
            rules,
            class: self.table.rule_set(rules).class(),
            begin: Some(id),
            parent: self.current_node(),
            start: span.start,
        });
        tracing::trace!(context = %self.table.rule_set(rules).name(), %span, "open");
        self.stack.push(OpenContext {
            node,
            rules,
            begin: id,
            first: self.pending.len(),
            start: span.start,
        });
        self.pending.push(Token::new(span, TokenKind::Node(node)));
    }

    fn close(&mut self, id: DelimId, span: Span) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        self.pending.push(Token::new(span, TokenKind::Node(open.node)));
        let children = self.pending.split_off(open.first);
        self.forest.seal(open.node, children, Some(id), span.end);
        tracing::trace!(node = ?open.node, %span, "close");
        self.pending
            .push(Token::new(Span::new(open.start, span.end), TokenKind::Node(open.node)));
    }
}

/// Lex with the built-in default grammar.
pub fn lex(source: &str) -> LexOutput {
    let table = RuleSetTable::builtin();
    lex_with(table, source, table.default_rules())
}

/// Lex with an explicit table and starting rule set.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex_with(table: &RuleSetTable, source: &str, rules: RuleSetId) -> LexOutput {
    Lexer::new(table, source, rules).finish()
}

/// Text of the first top-level token, lexing no further than needed.
pub fn first_word(source: &str) -> Option<String> {
    let table = RuleSetTable::builtin();
    let mut lexer = Lexer::new(table, source, table.default_rules());
    lexer.run_while(|progress| progress.top_level_tokens == 0);
    let output = lexer.finish();
    let forest = &output.forest;
    forest
        .top_level()
        .first()
        .map(|token| forest.token_text(token).to_owned())
}
