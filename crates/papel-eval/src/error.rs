//! Evaluation errors
//!
//! Coercion producing NaN is a valid value, never an error; these variants
//! cover only the operations the language refuses to perform.

use papel_diagnostics::PapelError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised while evaluating an expression
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The called name is not in the function catalog
    #[error("unknown function: {name}")]
    UnknownFunction { name: String },

    /// Bracket member access (`obj[expr]`) is unsupported
    #[error("computed member access is not supported")]
    ComputedAccess,

    /// The callee was not a bare function name
    #[error("only direct calls to named functions are supported")]
    IndirectCall,

    /// Expression nesting exceeded the depth guard
    #[error("maximum expression depth exceeded")]
    RecursionLimit,
}

impl EvalError {
    /// Create an unknown-function error
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction { name: name.into() }
    }
}

impl From<EvalError> for PapelError {
    fn from(err: EvalError) -> Self {
        PapelError::eval(err.to_string())
    }
}
