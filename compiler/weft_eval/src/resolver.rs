//! Resolution of a grouped forest into a value.
//!
//! Terms are resolved strictly left to right and depth first, because scope
//! lookups and invocations may have side effects on the host. A failure is
//! logged once where it happens and replaced by `Value::Unresolved` holding
//! the failing source text; operators that receive an unresolved operand
//! pass it on without logging again.

use std::rc::Rc;

use weft_diagnostic::{ErrorCategory, ErrorLog};
use weft_ir::{Forest, NodeId, Operator, OperatorShape, Span, Token, TokenKind};
use weft_lexer::{grammar, RuleSetTable, Simplify};

use crate::convert::condition_holds;
use crate::errors::{self, invoke_failed, member_name_expected, no_member, ResolveError};
use crate::mode::{Progress, ResolutionMode, TermKind};
use crate::operators::{evaluate_binary, evaluate_not};
use crate::scope::{InvokeError, Scope};
use crate::stack::ensure_sufficient_stack;
use crate::value::HostObject;
use crate::Value;

pub struct Resolver<'a> {
    table: &'a RuleSetTable,
    forest: &'a Forest,
    errors: &'a mut ErrorLog,
    scope: &'a dyn Scope,
    mode: ResolutionMode<'a>,
}

/// What a name directly followed by an argument list turned out to be.
enum NameCall {
    /// A scope member; the argument list is an ordinary next term.
    Member(Value),
    /// Values replacing both the name and its argument list.
    Called(Vec<Value>),
}

/// One step of a flattened member chain.
enum ChainItem<'t> {
    Visit(&'t Token),
    Link(Operator),
}

impl<'a> Resolver<'a> {
    pub fn new(
        table: &'a RuleSetTable,
        forest: &'a Forest,
        errors: &'a mut ErrorLog,
        scope: &'a dyn Scope,
    ) -> Self {
        Resolver {
            table,
            forest,
            errors,
            scope,
            mode: ResolutionMode::Full,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ResolutionMode<'a>) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve the whole forest. A single top-level term stands for itself.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve(&mut self) -> Value {
        Value::collapse(self.resolve_terms())
    }

    /// Every top-level term, in order.
    pub fn resolve_terms(&mut self) -> Vec<Value> {
        let root = self.forest.root();
        let values = self.list(root);
        tracing::debug!(terms = values.len(), errors = self.errors.len(), "resolved");
        values
    }

    // === Term lists ===

    /// Resolve the terms of `owner`, skipping its boundary markers, nested
    /// comments and list separators.
    fn list(&mut self, owner: NodeId) -> Vec<Value> {
        let forest = self.forest;
        if forest.node(owner).class.is_text_literal() {
            return forest
                .children(owner)
                .iter()
                .filter(|t| !forest.is_boundary(owner, t))
                .map(|t| self.literal_piece(t))
                .collect();
        }
        let terms: Vec<&'a Token> = forest
            .children(owner)
            .iter()
            .filter(|t| !forest.is_boundary(owner, t) && !self.is_comment(t))
            .collect();

        let mut values = Vec::with_capacity(terms.len());
        let mut expect_item = true;
        let mut i = 0;
        while i < terms.len() {
            let token = terms[i];
            i += 1;
            if let Some(separator) = self.separator_text(token) {
                if expect_item {
                    self.errors.push(
                        ErrorCategory::Structure,
                        token.span,
                        errors::unexpected_separator(separator),
                    );
                }
                expect_item = true;
                continue;
            }
            expect_item = false;

            let arguments = terms.get(i).copied().and_then(|t| self.argument_list(t));
            let Some(args_node) = arguments else {
                values.push(self.resolve_token(token, false));
                continue;
            };
            if token.kind == TokenKind::Text {
                match self.call_by_name(token, args_node) {
                    Some(NameCall::Member(value)) => {
                        values.push(value);
                        continue;
                    }
                    Some(NameCall::Called(called)) => {
                        i += 1;
                        values.extend(called);
                        continue;
                    }
                    None => {}
                }
            }
            let value = self.resolve_token(token, true);
            if let Value::Invocation { target, name } = &value {
                i += 1;
                values.push(self.call_member(target, name, token, args_node));
            } else {
                values.push(value);
            }
        }
        values
    }

    /// Pieces of a text literal are raw text, never names.
    fn literal_piece(&mut self, token: &Token) -> Value {
        match token.kind {
            TokenKind::Literal(id) => Value::from(self.forest.literal(id).clone()),
            TokenKind::Node(id) => self.resolve_node(id, false),
            TokenKind::Text | TokenKind::Delimiter(_) => {
                Value::str(self.forest.token_text(token))
            }
        }
    }

    fn is_comment(&self, token: &Token) -> bool {
        token
            .node()
            .is_some_and(|id| self.forest.node(id).class.is_comment())
    }

    fn separator_text(&self, token: &Token) -> Option<&'a str> {
        let table = self.table;
        match token.kind {
            TokenKind::Delimiter(id) => {
                let spec = table.delimiter(id);
                spec.is_separator().then_some(spec.text.as_str())
            }
            _ => None,
        }
    }

    /// `token` as an argument list: a parenthesised group.
    fn argument_list(&self, token: &Token) -> Option<NodeId> {
        let id = token.node()?;
        let node = self.forest.node(id);
        let parens = node.operator.is_none()
            && self.table.rule_set(node.rules).name() == grammar::PARENS;
        parens.then_some(id)
    }

    // === Invocation ===

    /// `name (args)`. A name that is a scope member is a value, not a call.
    ///
    /// `None` resolves the name as an ordinary term. A name the scope has no
    /// function for keeps its text, and the already resolved arguments
    /// become the group's value.
    fn call_by_name(&mut self, token: &Token, args_node: NodeId) -> Option<NameCall> {
        let name = self.forest.token_text(token);
        let progress = Progress {
            text: name,
            kind: TermKind::Name,
        };
        if name == "null" || self.mode.stops_at(&progress) {
            return None;
        }
        if let Some(value) = self.scope.try_get_member(name) {
            tracing::trace!(name, found = true, "name lookup");
            return Some(NameCall::Member(value));
        }
        let args = self.list(args_node);
        let span = token.span.merge(self.forest.node(args_node).span);
        let called = match self.scope.try_invoke(name, &args) {
            Ok(value) => {
                tracing::trace!(name, args = args.len(), "invoked");
                vec![value]
            }
            Err(InvokeError::NotFound(_)) => {
                let group = self.simplify(args_node, args);
                vec![Value::str(name), group]
            }
            Err(error) => vec![self.fail_at(span, &invoke_failed(&error))],
        };
        Some(NameCall::Called(called))
    }

    /// A deferred member call, now that its arguments follow.
    fn call_member(
        &mut self,
        target: &HostObject,
        name: &str,
        token: &Token,
        args_node: NodeId,
    ) -> Value {
        let args = self.list(args_node);
        let span = token.span.merge(self.forest.node(args_node).span);
        match target.try_invoke(name, &args) {
            Ok(value) => {
                tracing::trace!(name, args = args.len(), "invoked member");
                value
            }
            Err(error) => self.fail_at(span, &invoke_failed(&error)),
        }
    }

    // === Tokens and nodes ===

    fn resolve_token(&mut self, token: &Token, call_follows: bool) -> Value {
        ensure_sufficient_stack(|| self.resolve_token_inner(token, call_follows))
    }

    fn resolve_token_inner(&mut self, token: &Token, call_follows: bool) -> Value {
        let forest = self.forest;
        let text = forest.token_text(token);
        let progress = Progress {
            text,
            kind: self.term_kind(token),
        };
        if self.mode.stops_at(&progress) {
            return Value::Unresolved(text.to_owned());
        }
        match token.kind {
            TokenKind::Text => self.lookup_name(text),
            TokenKind::Literal(id) => Value::from(forest.literal(id).clone()),
            TokenKind::Delimiter(id) if self.table.delimiter(id).operator_info().is_some() => {
                // Already reported by the operator pass.
                Value::Unresolved(text.to_owned())
            }
            TokenKind::Delimiter(_) => Value::str(text),
            TokenKind::Node(id) => self.resolve_node(id, call_follows),
        }
    }

    fn term_kind(&self, token: &Token) -> TermKind {
        match token.kind {
            TokenKind::Text => TermKind::Name,
            TokenKind::Literal(_) => TermKind::Literal,
            TokenKind::Delimiter(_) => TermKind::Other,
            TokenKind::Node(id) => {
                let node = self.forest.node(id);
                match node.operator {
                    Some(op) => TermKind::Operator(op),
                    None if node.class.is_text_literal() => TermKind::Literal,
                    None => TermKind::Group,
                }
            }
        }
    }

    fn lookup_name(&self, name: &str) -> Value {
        if name == "null" {
            return Value::Null;
        }
        let found = self.scope.try_get_member(name);
        tracing::trace!(name, found = found.is_some(), "name lookup");
        found.unwrap_or_else(|| Value::str(name))
    }

    fn resolve_node(&mut self, id: NodeId, call_follows: bool) -> Value {
        let node = self.forest.node(id);
        if let Some(op) = node.operator {
            return self.resolve_operator(id, op, call_follows);
        }
        if node.class.is_comment() {
            return Value::Null;
        }
        let values = self.list(id);
        self.simplify(id, values)
    }

    fn simplify(&self, id: NodeId, values: Vec<Value>) -> Value {
        let rules = self.table.rule_set(self.forest.node(id).rules);
        match rules.simplify() {
            Some(Simplify::SingleTerm) => Value::collapse(values),
            Some(Simplify::Concatenate) => {
                Value::Str(values.iter().map(ToString::to_string).collect())
            }
            Some(Simplify::Discard) => Value::Null,
            None => Value::List(values),
        }
    }

    // === Operators ===

    fn resolve_operator(&mut self, id: NodeId, op: Operator, call_follows: bool) -> Value {
        let forest = self.forest;
        let children = forest.children(id);
        match op.shape() {
            OperatorShape::Binary if op.is_member() => self.member_chain(id, call_follows),
            OperatorShape::Binary => {
                let left = self.resolve_token(&children[0], false);
                let right = self.resolve_token(&children[2], false);
                if left.is_unresolved() || right.is_unresolved() {
                    return Value::Unresolved(forest.node_text(id).to_owned());
                }
                match evaluate_binary(op, &left, &right) {
                    Ok(value) => value,
                    Err(error) => self.fail(id, &error),
                }
            }
            OperatorShape::Prefix if op == Operator::Maybe => {
                let mark = self.errors.mark();
                let value = self.resolve_token(&children[1], false);
                self.errors.rollback(mark);
                Value::Bool(value == Value::Bool(true))
            }
            OperatorShape::Prefix => evaluate_not(self.resolve_token(&children[1], false)),
            OperatorShape::Conditional => {
                let condition = self.resolve_token(&children[1], false);
                if condition.is_unresolved() {
                    return Value::Unresolved(forest.node_text(id).to_owned());
                }
                if condition_holds(&condition) {
                    self.resolve_token(&children[2], false)
                } else {
                    children
                        .get(4)
                        .map_or(Value::Null, |alt| self.resolve_token(alt, false))
                }
            }
        }
    }

    /// `a.b.c`, looked up as `a`, then `b` on it, then `c` on that, however
    /// the operator pass grouped the chain.
    fn member_chain(&mut self, id: NodeId, call_follows: bool) -> Value {
        let (first, links) = self.chain_links(id);
        let mut current = self.resolve_token(first, false);
        for (i, &(op, segment)) in links.iter().enumerate() {
            if current.is_unresolved() {
                return Value::Unresolved(self.forest.node_text(id).to_owned());
            }
            if op == Operator::NullConditional && current.is_null() {
                return Value::Null;
            }
            let name = self.forest.token_text(segment);
            if segment.kind != TokenKind::Text {
                return self.fail(id, &member_name_expected(name));
            }
            let found = match &current {
                Value::Object(object) => object.try_get_member(name),
                _ => None,
            };
            tracing::trace!(name, found = found.is_some(), "member lookup");
            let Some(value) = found else {
                if let Value::Object(object) = &current {
                    if call_follows && i + 1 == links.len() {
                        return Value::Invocation {
                            target: Rc::clone(object),
                            name: name.to_owned(),
                        };
                    }
                }
                return self.fail(id, &no_member(name, current.type_name()));
            };
            current = value;
        }
        current
    }

    /// The first operand of a member chain and each following link.
    fn chain_links(&self, id: NodeId) -> (&'a Token, Vec<(Operator, &'a Token)>) {
        let forest = self.forest;
        let mut leaves: Vec<&'a Token> = Vec::new();
        let mut links: Vec<Operator> = Vec::new();
        let mut stack = Vec::new();
        push_member(forest, id, &mut stack);
        while let Some(item) = stack.pop() {
            match item {
                ChainItem::Link(op) => links.push(op),
                ChainItem::Visit(token) => match token.node() {
                    Some(child) if forest.node(child).operator.is_some_and(Operator::is_member) => {
                        push_member(forest, child, &mut stack);
                    }
                    _ => leaves.push(token),
                },
            }
        }
        let first = leaves[0];
        (first, links.into_iter().zip(leaves.into_iter().skip(1)).collect())
    }

    // === Failure ===

    fn fail(&mut self, id: NodeId, error: &ResolveError) -> Value {
        self.fail_at(self.forest.node(id).span, error)
    }

    fn fail_at(&mut self, span: Span, error: &ResolveError) -> Value {
        self.errors
            .push(ErrorCategory::Resolution, span, error.message.clone());
        Value::Unresolved(self.forest.source()[span.to_range()].to_owned())
    }
}

/// Queue a member node's operands around its link, left operand on top.
fn push_member<'t>(forest: &'t Forest, id: NodeId, stack: &mut Vec<ChainItem<'t>>) {
    let children = forest.children(id);
    if let Some(op) = forest.node(id).operator {
        stack.push(ChainItem::Visit(&children[2]));
        stack.push(ChainItem::Link(op));
        stack.push(ChainItem::Visit(&children[0]));
    }
}
