//! Operator enums for papel expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Truthiness negation (`!`)
    Not,
    /// Numeric coercion, sign kept (`+`)
    Plus,
    /// Numeric coercion and negation (`-`)
    Minus,
}

impl UnaryOp {
    /// The source symbol for this operator
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Binary operators (arithmetic, comparison, equality)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Numeric addition or string concatenation (`+`)
    Add,
    /// Numeric subtraction (`-`)
    Subtract,
    /// Numeric multiplication (`*`)
    Multiply,
    /// Numeric division (`/`)
    Divide,
    /// Numeric remainder (`%`)
    Modulo,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessOrEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterOrEqual,
    /// Loose (coercing) equality (`==`)
    Equal,
    /// Loose (coercing) inequality (`!=`)
    NotEqual,
    /// Strict equality, no coercion (`===`)
    StrictEqual,
    /// Strict inequality, no coercion (`!==`)
    StrictNotEqual,
}

impl BinaryOp {
    /// The source symbol for this operator
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Short-circuiting logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Returns the left operand when falsy, else the right (`&&`)
    And,
    /// Returns the left operand when truthy, else the right (`||`)
    Or,
}

impl LogicalOp {
    /// The source symbol for this operator
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
