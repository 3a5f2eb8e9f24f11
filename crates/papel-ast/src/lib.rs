//! Abstract syntax tree for papel template expressions
//!
//! This crate defines the closed set of node shapes the evaluator consumes.
//! Nodes are immutable once built and may be shared read-only across repeated
//! evaluations of the same expression (for example, per table row) without
//! re-parsing.

mod expression;
mod literal;
mod operator;

pub use expression::*;
pub use literal::*;
pub use operator::*;

/// Type alias for boxed expressions
pub type BoxExpr = Box<Expression>;
