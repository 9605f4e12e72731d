//! Operator resolution.
//!
//! After lexing, operator delimiters sit flat in their token lists. This
//! pass collapses each one together with its operands into an operator
//! node, innermost lists first, then by precedence tier, then right to
//! left.
//!
//! Positions are recorded as paths of child slots from the root. A collapse
//! shifts the slots to its right, so a later path may no longer lead to its
//! operator. The pass notices that when re-walking the path, stops, and
//! rescans the forest for the operators still unprocessed. It repeats until
//! none remain.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use weft_diagnostic::{ErrorCategory, ErrorLog};
use weft_ir::{DelimId, Forest, NodeId, Operator, OperatorNode, OperatorShape, Token, TokenKind};
use weft_lexer::RuleSetTable;

use crate::parse_error;

#[derive(Clone, Debug)]
struct OperatorPath {
    /// Child slots from the root; the last one is the operator's own slot.
    slots: SmallVec<[usize; 8]>,
    offset: u32,
    delimiter: DelimId,
    operator: Operator,
    precedence: u16,
}

impl OperatorPath {
    fn depth(&self) -> usize {
        self.slots.len()
    }
}

/// Operand slots relative to the start of the collapsed run.
struct Shape {
    start: usize,
    count: usize,
    marker: usize,
    operands: SmallVec<[(usize, &'static str); 3]>,
}

pub struct OperatorResolver<'a> {
    table: &'a RuleSetTable,
    forest: &'a mut Forest,
    errors: &'a mut ErrorLog,
    /// Offsets of operators already collapsed or rejected.
    finished: FxHashSet<u32>,
}

impl<'a> OperatorResolver<'a> {
    pub fn new(table: &'a RuleSetTable, forest: &'a mut Forest, errors: &'a mut ErrorLog) -> Self {
        OperatorResolver {
            table,
            forest,
            errors,
            finished: FxHashSet::default(),
        }
    }

    /// Run passes until every operator delimiter was collapsed or rejected.
    pub fn run(mut self) {
        let mut passes = 0usize;
        loop {
            let mut paths = self.find_paths();
            if paths.is_empty() {
                break;
            }
            passes += 1;
            paths.sort_by(|a, b| {
                b.depth()
                    .cmp(&a.depth())
                    .then(a.precedence.cmp(&b.precedence))
                    .then(b.offset.cmp(&a.offset))
            });
            let total = paths.len();
            let mut processed = 0usize;
            for path in &paths {
                let Some((owner, slot)) = self.walk(path) else {
                    break;
                };
                self.rewrite(owner, slot, path);
                processed += 1;
            }
            tracing::debug!(passes, total, processed, "operator pass");
        }
    }

    /// Every unprocessed operator delimiter, at any depth.
    ///
    /// Nodes are recorded as links to their parent's link, so a full path is
    /// only built for the operators themselves.
    fn find_paths(&self) -> Vec<OperatorPath> {
        let mut found = Vec::new();
        // (parent link, slot in the parent)
        let mut links: Vec<(Option<usize>, usize)> = Vec::new();
        let mut pending: Vec<(NodeId, Option<usize>)> = vec![(self.forest.root(), None)];
        while let Some((owner, link)) = pending.pop() {
            for (slot, token) in self.forest.children(owner).iter().enumerate() {
                match token.kind {
                    TokenKind::Delimiter(id) if !self.finished.contains(&token.span.start) => {
                        if let Some((operator, precedence)) =
                            self.table.delimiter(id).operator_info()
                        {
                            found.push(OperatorPath {
                                slots: slots_through(&links, link, slot),
                                offset: token.span.start,
                                delimiter: id,
                                operator,
                                precedence,
                            });
                        }
                    }
                    TokenKind::Node(child) if child != owner => {
                        links.push((link, slot));
                        pending.push((child, Some(links.len() - 1)));
                    }
                    _ => {}
                }
            }
        }
        found
    }

    /// Follow a path; `None` if it no longer ends at its operator.
    fn walk(&self, path: &OperatorPath) -> Option<(NodeId, usize)> {
        let (&last, inner) = path.slots.split_last()?;
        let mut owner = self.forest.root();
        for &slot in inner {
            match self.forest.children(owner).get(slot)?.kind {
                TokenKind::Node(child) if child != owner => owner = child,
                _ => return None,
            }
        }
        let token = self.forest.children(owner).get(last)?;
        let intact =
            token.kind == TokenKind::Delimiter(path.delimiter) && token.span.start == path.offset;
        intact.then_some((owner, last))
    }

    fn rewrite(&mut self, owner: NodeId, slot: usize, path: &OperatorPath) {
        self.finished.insert(path.offset);
        let table = self.table;
        let operator_token = self.forest.children(owner)[slot];
        let symbol = table.delimiter(path.delimiter).text.as_str();

        let Some(shape) = self.shape(owner, slot, path.operator) else {
            self.report(
                &operator_token,
                parse_error::missing_operand("left operand", symbol),
            );
            return;
        };
        for &(relative, operand) in &shape.operands {
            let message = match self.forest.children(owner).get(shape.start + relative) {
                None => Some(parse_error::missing_operand(operand, symbol)),
                Some(token)
                    if self.forest.is_boundary(owner, token) || self.is_operator(token) =>
                {
                    Some(parse_error::missing_operand(operand, symbol))
                }
                Some(token) => self.separator_text(token).map(|separator| {
                    parse_error::unexpected_separator(separator, operand, symbol)
                }),
            };
            if let Some(message) = message {
                self.report(&operator_token, message);
                return;
            }
        }

        let rules = table
            .id_of(path.operator.context_name())
            .unwrap_or(self.forest.node(owner).rules);
        let node = OperatorNode {
            rules,
            operator: path.operator,
            delimiter: path.delimiter,
            marker: shape.marker,
        };
        let collapsed = self.forest.collapse(owner, shape.start, shape.count, &node);
        tracing::trace!(
            operator = ?path.operator,
            offset = path.offset,
            ?collapsed,
            "operator collapsed"
        );
    }

    /// The run of tokens an operator at `slot` takes; `None` when a binary
    /// operator has nothing on its left.
    fn shape(&self, owner: NodeId, slot: usize, operator: Operator) -> Option<Shape> {
        let shape = match operator.shape() {
            OperatorShape::Binary => Shape {
                start: slot.checked_sub(1)?,
                count: 3,
                marker: 1,
                operands: SmallVec::from_slice(&[(0, "left operand"), (2, "right operand")]),
            },
            OperatorShape::Prefix => Shape {
                start: slot,
                count: 2,
                marker: 0,
                operands: SmallVec::from_slice(&[(1, "operand")]),
            },
            OperatorShape::Conditional => {
                let has_else = self
                    .forest
                    .children(owner)
                    .get(slot + 3)
                    .is_some_and(|t| t.kind == TokenKind::Text && self.forest.token_text(t) == "else");
                let mut operands: SmallVec<[(usize, &'static str); 3]> =
                    SmallVec::from_slice(&[(1, "condition"), (2, "true case")]);
                if has_else {
                    operands.push((4, "false case"));
                }
                Shape {
                    start: slot,
                    count: if has_else { 5 } else { 3 },
                    marker: 0,
                    operands,
                }
            }
        };
        Some(shape)
    }

    /// An operator delimiter left raw because it was rejected, or not yet
    /// collapsed since it binds later. Either way it is no operand.
    fn is_operator(&self, token: &Token) -> bool {
        matches!(
            token.kind,
            TokenKind::Delimiter(id) if self.table.delimiter(id).operator_info().is_some()
        )
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

    fn report(&mut self, token: &Token, message: String) {
        self.errors.push(ErrorCategory::Structure, token.span, message);
    }
}

/// Child slots from the root down to `last`, following parent links.
fn slots_through(
    links: &[(Option<usize>, usize)],
    mut link: Option<usize>,
    last: usize,
) -> SmallVec<[usize; 8]> {
    let mut slots: SmallVec<[usize; 8]> = SmallVec::new();
    slots.push(last);
    while let Some(index) = link {
        let (parent, slot) = links[index];
        slots.push(slot);
        link = parent;
    }
    slots.reverse();
    slots
}

#[cfg(test)]
mod tests;
