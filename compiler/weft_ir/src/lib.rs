//! Weft IR - shared data structures for the weft pipeline
//!
//! This crate holds everything the lexer, the operator pass and the
//! evaluator agree on:
//! - `Span` for byte ranges into the source text
//! - Arena ids (`NodeId`, `DelimId`, `RuleSetId`, `LiteralId`)
//! - `Literal` values substituted by scan rules
//! - The `Operator` table (precedence tier, operand shape, context name)
//! - The token `Forest`: one flat token arena, nodes owning disjoint ranges
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: tokens live in one `Vec`, nodes address them by
//!   `(start, len)` ranges, children refer to nodes by `NodeId`
//! - **Text is never copied**: every token and node reproduces its source
//!   substring from its span

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod class;
mod forest;
mod ids;
mod literal;
mod operator;
mod span;

pub use class::ContextClass;
pub use forest::{
    Forest, Inclusion, NewNode, Node, OperatorNode, SourceMeta, Token, TokenKind, TokenRange,
};
pub use ids::{DelimId, LiteralId, NodeId, RuleSetId};
pub use literal::Literal;
pub use operator::{Operator, OperatorShape};
pub use span::Span;
