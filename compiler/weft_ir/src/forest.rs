//! The token forest.
//!
//! One flat arena of tokens plus a list of nodes. Each sealed node owns a
//! contiguous `TokenRange` of the arena; ranges of different nodes never
//! overlap. A node's list begins and ends with boundary tokens (tokens whose
//! payload points back at the node itself) when it was opened and closed by
//! delimiters. The parent list holds one `TokenKind::Node` token standing in
//! for the whole node.
//!
//! Nodes are created while lexing and rewritten only by `collapse` during
//! the operator pass. After that the forest is read-only.

mod dump;
mod flatten;

use std::sync::Arc;

use crate::{ContextClass, DelimId, Literal, LiteralId, NodeId, Operator, RuleSetId, Span};

pub use flatten::Inclusion;

/// Minimal lexing unit: a position plus exactly one payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Plain text; the payload is the spanned source.
    Text,
    /// A nested node, or the node's own boundary marker inside its list.
    Node(NodeId),
    /// A recognised delimiter with no substituted value.
    Delimiter(DelimId),
    /// A value produced by a scan rule.
    Literal(LiteralId),
}

impl Token {
    #[inline]
    pub const fn new(span: Span, kind: TokenKind) -> Self {
        Token { span, kind }
    }

    /// The node this token refers to, if any.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        match self.kind {
            TokenKind::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// A node's slice of the token arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenRange {
    pub start: u32,
    pub len: u32,
}

impl TokenRange {
    #[inline]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

/// What produced a node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SourceMeta {
    /// The root of a lex run over raw text.
    Text,
    /// A context start delimiter, or the operator delimiter of a collapsed
    /// application.
    Delimiter(DelimId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub rules: RuleSetId,
    pub class: ContextClass,
    pub operator: Option<Operator>,
    pub range: TokenRange,
    pub begin: Option<DelimId>,
    pub end: Option<DelimId>,
    /// Lookup only; never used to keep a node alive.
    pub parent: Option<NodeId>,
    pub source: SourceMeta,
    pub span: Span,
}

/// Parameters for a context node opened by the lexer.
#[derive(Copy, Clone, Debug)]
pub struct NewNode {
    pub rules: RuleSetId,
    pub class: ContextClass,
    pub begin: Option<DelimId>,
    pub parent: NodeId,
    pub start: u32,
}

/// Parameters for a node created by collapsing an operator application.
#[derive(Copy, Clone, Debug)]
pub struct OperatorNode {
    pub rules: RuleSetId,
    pub operator: Operator,
    pub delimiter: DelimId,
    /// Slot of the operator token inside the collapsed run.
    pub marker: usize,
}

#[derive(Clone, Debug)]
pub struct Forest {
    source: Arc<str>,
    tokens: Vec<Token>,
    nodes: Vec<Node>,
    literals: Vec<Literal>,
    root: NodeId,
}

impl Forest {
    /// Create a forest whose root spans the whole source.
    pub fn new(source: Arc<str>, rules: RuleSetId) -> Self {
        let root = Node {
            rules,
            class: ContextClass::ROOT,
            operator: None,
            range: TokenRange::default(),
            begin: None,
            end: None,
            parent: None,
            source: SourceMeta::Text,
            span: Span::at(0, source.len()),
        };
        Forest {
            source,
            tokens: Vec::new(),
            nodes: vec![root],
            literals: Vec::new(),
            root: NodeId::new(0),
        }
    }

    // === Construction ===

    /// Allocate an open context node. Its range stays empty until `seal`.
    pub fn open_node(&mut self, new: NewNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            rules: new.rules,
            class: new.class,
            operator: None,
            range: TokenRange::default(),
            begin: new.begin,
            end: None,
            parent: Some(new.parent),
            source: new.begin.map_or(SourceMeta::Text, SourceMeta::Delimiter),
            span: Span::point(new.start),
        });
        id
    }

    pub fn push_literal(&mut self, literal: Literal) -> LiteralId {
        let id = LiteralId::new(self.literals.len());
        self.literals.push(literal);
        id
    }

    /// Hand a finished token list to `node`, moving it into the arena.
    ///
    /// Nested nodes in `children` already own their ranges, so nothing
    /// inside them moves.
    pub fn seal(&mut self, node: NodeId, children: Vec<Token>, end: Option<DelimId>, end_offset: u32) {
        let start = self.tokens.len();
        let len = children.len();
        self.tokens.extend(children);
        let node = &mut self.nodes[node.index()];
        node.range = TokenRange {
            start: to_u32(start),
            len: to_u32(len),
        };
        node.end = end;
        node.span.end = end_offset;
    }

    /// Replace `count` tokens of `owner` starting at slot `at` with one node
    /// token for a new operator node that owns exactly those tokens.
    ///
    /// The token at `at + op.marker` becomes the new node's boundary marker.
    /// Returns `None` without touching anything if the run is out of range.
    pub fn collapse(
        &mut self,
        owner: NodeId,
        at: usize,
        count: usize,
        op: &OperatorNode,
    ) -> Option<NodeId> {
        let range = self.nodes.get(owner.index())?.range;
        if count == 0 || op.marker >= count || at + count > range.len as usize {
            return None;
        }
        let base = range.start as usize + at;
        let end = range.start as usize + range.len as usize;
        let id = NodeId::new(self.nodes.len());

        let new_start = self.tokens.len();
        self.tokens.extend_from_within(base..base + count);
        let moved = new_start..new_start + count;
        self.tokens[new_start + op.marker].kind = TokenKind::Node(id);
        let span = self.tokens[new_start]
            .span
            .merge(self.tokens[new_start + count - 1].span);

        let children: Vec<NodeId> = self.tokens[moved]
            .iter()
            .filter_map(Token::node)
            .filter(|&child| child != id)
            .collect();
        for child in children {
            self.nodes[child.index()].parent = Some(id);
        }

        self.nodes.push(Node {
            rules: op.rules,
            class: ContextClass::OPERATOR,
            operator: Some(op.operator),
            range: TokenRange {
                start: to_u32(new_start),
                len: to_u32(count),
            },
            begin: None,
            end: None,
            parent: Some(owner),
            source: SourceMeta::Delimiter(op.delimiter),
            span,
        });

        self.tokens[base] = Token::new(span, TokenKind::Node(id));
        self.tokens.copy_within(base + count..end, base + 1);
        self.nodes[owner.index()].range.len -= to_u32(count - 1);
        Some(id)
    }

    // === Access ===

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shared handle to the source text.
    #[inline]
    pub fn source_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The token list owned by `id`, boundary markers included.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[Token] {
        &self.tokens[self.nodes[id.index()].range.to_range()]
    }

    /// Tokens of the root list.
    #[inline]
    pub fn top_level(&self) -> &[Token] {
        self.children(self.root)
    }

    #[inline]
    pub fn literal(&self, id: LiteralId) -> &Literal {
        &self.literals[id.index()]
    }

    /// True if `token` is `owner`'s own begin/end (or operator) marker.
    #[inline]
    pub fn is_boundary(&self, owner: NodeId, token: &Token) -> bool {
        token.kind == TokenKind::Node(owner)
    }

    // === Text ===

    /// Exact source text of a token, delimiters included.
    #[inline]
    pub fn token_text(&self, token: &Token) -> &str {
        &self.source[token.span.to_range()]
    }

    /// Exact source text of a node, its own delimiters included.
    #[inline]
    pub fn node_text(&self, id: NodeId) -> &str {
        &self.source[self.nodes[id.index()].span.to_range()]
    }

    /// Source text between a node's begin and end delimiters.
    pub fn inner_text(&self, id: NodeId) -> &str {
        let node = &self.nodes[id.index()];
        let children = self.children(id);
        let mut start = node.span.start;
        let mut end = node.span.end;
        if node.begin.is_some() {
            if let Some(first) = children.first().filter(|t| self.is_boundary(id, t)) {
                start = first.span.end;
            }
        }
        if node.end.is_some() {
            if let Some(last) = children.last().filter(|t| self.is_boundary(id, t)) {
                end = last.span.start.max(start);
            }
        }
        &self.source[start as usize..end as usize]
    }

    /// Text of a string-like node with escapes replaced by their values.
    pub fn string_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for token in self.children(id) {
            match token.kind {
                TokenKind::Node(child) if child == id => {}
                TokenKind::Literal(lit) => {
                    use std::fmt::Write;
                    let _ = write!(out, "{}", self.literal(lit));
                }
                _ => out.push_str(self.token_text(token)),
            }
        }
        out
    }

    // === Shape ===

    /// Number of parent links between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.index()].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.index()].parent;
        }
        depth
    }
}

#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "token arena is indexed by u32, bounded by source length"
)]
const fn to_u32(n: usize) -> u32 {
    n as u32
}
