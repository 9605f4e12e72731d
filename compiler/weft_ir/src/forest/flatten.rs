//! Breadth-first flattening with a per-node inclusion policy.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::{Forest, Node, Token, TokenKind};
use crate::{ContextClass, NodeId, Span};

/// What `Forest::flatten` does with a nested node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Inclusion {
    /// Emit the node token and walk its children.
    Include,
    /// Emit the node token as one opaque unit; skip its children.
    Opaque,
    /// Skip the node token but walk its children.
    ChildrenOnly,
    /// Skip the node and everything under it.
    Skip,
}

impl Forest {
    /// Flatten the forest breadth-first, starting from the root list.
    ///
    /// Tokens are keyed by position and length; a token seen once is never
    /// emitted or descended into again.
    pub fn flatten(&self, policy: impl Fn(&Node) -> Inclusion) -> Vec<Token> {
        let mut out = Vec::new();
        let mut seen: FxHashSet<Span> = FxHashSet::default();
        let mut queue: VecDeque<NodeId> = VecDeque::from([self.root()]);

        while let Some(owner) = queue.pop_front() {
            for token in self.children(owner) {
                if !seen.insert(token.span) {
                    continue;
                }
                match token.kind {
                    TokenKind::Node(id) if id != owner => match policy(self.node(id)) {
                        Inclusion::Include => {
                            out.push(*token);
                            queue.push_back(id);
                        }
                        Inclusion::Opaque => out.push(*token),
                        Inclusion::ChildrenOnly => queue.push_back(id),
                        Inclusion::Skip => {}
                    },
                    _ => out.push(*token),
                }
            }
        }
        out
    }

    /// Flatten with string bodies and line comments kept opaque.
    pub fn flatten_standard(&self) -> Vec<Token> {
        self.flatten(|node| {
            if node
                .class
                .intersects(ContextClass::TEXT_LITERAL | ContextClass::LINE_COMMENT)
            {
                Inclusion::Opaque
            } else {
                Inclusion::Include
            }
        })
    }
}
