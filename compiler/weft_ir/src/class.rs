//! Context classification flags.

use bitflags::bitflags;

bitflags! {
    /// What kind of context a node stands for.
    ///
    /// Copied from the owning rule set when the node is created so the
    /// forest can answer "is this a comment?" without the rule-set table.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ContextClass: u8 {
        /// The top-level list of a lex run.
        const ROOT = 1 << 0;
        /// Grouping brackets: `()`, `[]`, `{}`.
        const ENCLOSURE = 1 << 1;
        /// String or char body; plain text inside is literal, never a name.
        const TEXT_LITERAL = 1 << 2;
        /// Comment body, skipped when collecting terms.
        const COMMENT = 1 << 3;
        /// Closed implicitly by end of input without error.
        const LINE_COMMENT = 1 << 4;
        /// A collapsed operator application.
        const OPERATOR = 1 << 5;
    }
}

impl ContextClass {
    #[inline]
    pub fn is_comment(self) -> bool {
        self.contains(ContextClass::COMMENT)
    }

    #[inline]
    pub fn is_text_literal(self) -> bool {
        self.contains(ContextClass::TEXT_LITERAL)
    }

    #[inline]
    pub fn is_enclosure(self) -> bool {
        self.contains(ContextClass::ENCLOSURE)
    }
}
