//! Operator table.
//!
//! Every operator delimiter maps to one `Operator`. The table fixes three
//! things the operator pass and the evaluator need:
//! - the precedence tier (lower binds first)
//! - the operand shape, which decides how many neighbours get collapsed
//! - the context name given to the collapsed node

/// How an operator consumes its neighbouring tokens.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperatorShape {
    /// `left op right`
    Binary,
    /// `op operand`
    Prefix,
    /// `if cond then` or `if cond then else alt`
    Conditional,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    // Membership
    Member,
    Pointee,
    ScopeResolution,
    NullConditional,
    // Keywords
    If,
    Maybe,
    Not,
    // Arithmetic
    Power,
    Multiply,
    Divide,
    Modulus,
    Add,
    Subtract,
    // Comparison
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Equal,
    NotEqual,
    // Logical
    And,
    Or,
}

impl Operator {
    pub const ALL: [Operator; 21] = [
        Operator::Member,
        Operator::Pointee,
        Operator::ScopeResolution,
        Operator::NullConditional,
        Operator::If,
        Operator::Maybe,
        Operator::Not,
        Operator::Power,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulus,
        Operator::Add,
        Operator::Subtract,
        Operator::Less,
        Operator::Greater,
        Operator::LessEq,
        Operator::GreaterEq,
        Operator::Equal,
        Operator::NotEqual,
        Operator::And,
        Operator::Or,
    ];

    /// Source text of the operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Member => ".",
            Operator::Pointee => "->",
            Operator::ScopeResolution => "::",
            Operator::NullConditional => "?.",
            Operator::If => "if",
            Operator::Maybe => "maybe",
            Operator::Not => "not",
            Operator::Power => "^^",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulus => "%",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEq => "<=",
            Operator::GreaterEq => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }

    /// Precedence tier. Only the relative order is meaningful.
    pub const fn precedence(self) -> u16 {
        match self {
            Operator::Member | Operator::If => 10,
            Operator::Pointee => 11,
            Operator::ScopeResolution => 12,
            Operator::NullConditional => 13,
            Operator::Power => 20,
            Operator::Multiply => 30,
            Operator::Divide => 31,
            Operator::Modulus => 32,
            Operator::Add => 40,
            Operator::Subtract => 41,
            Operator::Less => 60,
            Operator::Greater => 61,
            Operator::LessEq => 62,
            Operator::GreaterEq => 63,
            Operator::Equal => 70,
            Operator::NotEqual => 71,
            Operator::And => 110,
            Operator::Or => 120,
            Operator::Maybe => 210,
            Operator::Not => 220,
        }
    }

    pub const fn shape(self) -> OperatorShape {
        match self {
            Operator::If => OperatorShape::Conditional,
            Operator::Maybe | Operator::Not => OperatorShape::Prefix,
            _ => OperatorShape::Binary,
        }
    }

    /// Name of the context a collapsed application of this operator gets.
    pub const fn context_name(self) -> &'static str {
        match self {
            Operator::Member
            | Operator::Pointee
            | Operator::ScopeResolution
            | Operator::NullConditional => "membership operator",
            Operator::If => "if statement",
            Operator::Maybe => "maybe modifier",
            Operator::Not => "not modifier",
            Operator::Power => "power",
            Operator::Multiply => "product",
            Operator::Divide => "quotient",
            Operator::Modulus => "modulus",
            Operator::Add => "sum",
            Operator::Subtract => "difference",
            Operator::Less => "less than",
            Operator::Greater => "greater than",
            Operator::LessEq => "less than or equal",
            Operator::GreaterEq => "greater than or equal",
            Operator::Equal => "equal",
            Operator::NotEqual => "not equal",
            Operator::And => "logical and",
            Operator::Or => "logical or",
        }
    }

    /// Keyword operators must not split identifiers that contain them.
    pub const fn is_breaking(self) -> bool {
        !matches!(self, Operator::If | Operator::Maybe | Operator::Not)
    }

    pub const fn is_member(self) -> bool {
        matches!(
            self,
            Operator::Member
                | Operator::Pointee
                | Operator::ScopeResolution
                | Operator::NullConditional
        )
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Less
                | Operator::Greater
                | Operator::LessEq
                | Operator::GreaterEq
                | Operator::Equal
                | Operator::NotEqual
        )
    }
}
