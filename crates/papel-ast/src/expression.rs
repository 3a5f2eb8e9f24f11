//! Expression AST nodes
//!
//! The closed node set the evaluator dispatches on. The parser may produce
//! shapes the evaluator later rejects (computed member access, calls on
//! arbitrary sub-expressions); rejection is an evaluation-stage concern so
//! that authoring tools can still show the parsed structure.

use crate::{BinaryOp, BoxExpr, Literal, LogicalOp, UnaryOp};
use serde::{Deserialize, Serialize};

/// All expression node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value (null, boolean, number, string)
    Literal(Literal),
    /// Identifier reference (namespace, reserved word, or function name)
    Identifier(IdentifierRef),
    /// Unary operation (`!`, unary `+`, unary `-`)
    Unary(UnaryExpr),
    /// Binary operation (arithmetic, comparison, equality)
    Binary(BinaryExpr),
    /// Short-circuiting logical operation (`&&`, `||`)
    Logical(LogicalExpr),
    /// Conditional (`cond ? then : else`)
    Conditional(ConditionalExpr),
    /// Member access (`object.name` or `object[index]`)
    Member(MemberExpr),
    /// Function call (`callee(args...)`)
    Call(CallExpr),
    /// Array literal (`[a, b, c]`)
    Array(ArrayExpr),
    /// Object literal (`{key: value}`)
    Object(ObjectExpr),
}

/// Identifier reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRef {
    /// The referenced name
    pub name: String,
}

/// Unary operation expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    /// Operator
    pub op: UnaryOp,
    /// Operand
    pub operand: BoxExpr,
}

/// Binary operation expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    /// Left operand
    pub left: BoxExpr,
    /// Operator
    pub op: BinaryOp,
    /// Right operand
    pub right: BoxExpr,
}

/// Logical operation expression
///
/// Kept apart from [`BinaryExpr`] because the right operand is evaluated
/// conditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpr {
    /// Left operand
    pub left: BoxExpr,
    /// Operator
    pub op: LogicalOp,
    /// Right operand, evaluated only when not short-circuited
    pub right: BoxExpr,
}

/// Conditional expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpr {
    /// Condition
    pub condition: BoxExpr,
    /// Result when the condition is truthy
    pub then_expr: BoxExpr,
    /// Result when the condition is falsy
    pub else_expr: BoxExpr,
}

/// Member access expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    /// Source expression
    pub object: BoxExpr,
    /// Accessed property
    pub property: MemberProp,
}

/// The property side of a member access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberProp {
    /// Dot access with a literal name (`object.name`)
    Name(String),
    /// Bracket access with a computed key (`object[expr]`); parsed but
    /// rejected by the evaluator
    Computed(BoxExpr),
}

/// Function call expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    /// Callee; must be a bare [`Expression::Identifier`] to evaluate
    pub callee: BoxExpr,
    /// Arguments, evaluated eagerly left to right
    pub arguments: Vec<Expression>,
}

/// Array literal expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpr {
    /// Ordered elements
    pub elements: Vec<Expression>,
}

/// Object literal expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpr {
    /// Key/value entries in source order; duplicate keys overwrite earlier
    /// entries at evaluation time
    pub entries: Vec<ObjectEntry>,
}

/// A single key/value entry of an object literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Literal key (identifier or literal scalar in source; never computed)
    pub key: String,
    /// Value expression
    pub value: Expression,
}

// Helper constructors
impl Expression {
    /// Create a null literal
    pub fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Create a boolean literal
    pub fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Bool(value))
    }

    /// Create a numeric literal
    pub fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Create an identifier reference
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(IdentifierRef { name: name.into() })
    }

    /// Create a unary operation
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
        })
    }

    /// Create a binary operation
    pub fn binary(left: Expression, op: BinaryOp, right: Expression) -> Self {
        Self::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Create a logical operation
    pub fn logical(left: Expression, op: LogicalOp, right: Expression) -> Self {
        Self::Logical(LogicalExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Create a dot member access
    pub fn member(object: Expression, name: impl Into<String>) -> Self {
        Self::Member(MemberExpr {
            object: Box::new(object),
            property: MemberProp::Name(name.into()),
        })
    }

    /// Create a call with a bare identifier callee
    pub fn call(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self::Call(CallExpr {
            callee: Box::new(Self::identifier(name)),
            arguments,
        })
    }
}
