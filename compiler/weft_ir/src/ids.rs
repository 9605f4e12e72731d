//! Arena indices.
//!
//! All four ids are `u32` newtypes into a `Vec` owned elsewhere: nodes and
//! literals by the `Forest`, delimiters and rule sets by the lexer's
//! `RuleSetTable`.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            #[allow(
                clippy::cast_possible_truncation,
                reason = "arenas are indexed by u32; callers never exceed u32::MAX entries"
            )]
            pub const fn new(index: usize) -> Self {
                $name(index as u32)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id! {
    /// Index of a node in `Forest::nodes`.
    NodeId
}

define_id! {
    /// Index of a delimiter in a rule-set table.
    DelimId
}

define_id! {
    /// Index of a rule set in a rule-set table.
    RuleSetId
}

define_id! {
    /// Index of a substituted literal in `Forest::literals`.
    LiteralId
}
