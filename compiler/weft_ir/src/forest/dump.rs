//! Indented debug rendering of a forest.

use std::fmt::Write;

use super::{Forest, TokenKind};
use crate::{NodeId, RuleSetId};

impl Forest {
    /// Render the tree one token per line, nested nodes indented.
    ///
    /// `rule_name` maps a node's rule set to a display name.
    pub fn dump<'n>(&self, rule_name: impl Fn(RuleSetId) -> &'n str) -> String {
        let mut out = String::new();
        let root = self.node(self.root());
        let _ = writeln!(out, "{} @{}", rule_name(root.rules), root.span);

        // (owner, next child slot, depth)
        let mut stack: Vec<(NodeId, usize, usize)> = vec![(self.root(), 0, 1)];
        while let Some(&(owner, slot, depth)) = stack.last() {
            let children = self.children(owner);
            let Some(token) = children.get(slot) else {
                stack.pop();
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }
            let indent = "  ".repeat(depth);
            let text = self.token_text(token);
            match token.kind {
                TokenKind::Node(id) if id == owner => {
                    let _ = writeln!(out, "{indent}boundary {text:?} @{}", token.span);
                }
                TokenKind::Node(id) => {
                    let node = self.node(id);
                    let _ = writeln!(
                        out,
                        "{indent}{} {text:?} @{}",
                        rule_name(node.rules),
                        node.span
                    );
                    stack.push((id, 0, depth + 1));
                }
                TokenKind::Text => {
                    let _ = writeln!(out, "{indent}text {text:?} @{}", token.span);
                }
                TokenKind::Delimiter(_) => {
                    let _ = writeln!(out, "{indent}delimiter {text:?} @{}", token.span);
                }
                TokenKind::Literal(lit) => {
                    let _ = writeln!(
                        out,
                        "{indent}literal {:?} @{}",
                        self.literal(lit),
                        token.span
                    );
                }
            }
        }
        out
    }
}
