//! Error types shared across the papel workspace

use crate::SourceLocation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias using [`PapelError`]
pub type Result<T> = std::result::Result<T, PapelError>;

/// Errors surfaced at the boundaries of the expression subsystem
///
/// The two stages are distinguished only so callers can tell a malformed
/// expression from one that failed while running; both degrade to per-item
/// records in the resolver and renderer rather than aborting anything.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum PapelError {
    /// Malformed expression syntax
    #[error("parse error: {message}")]
    Parse {
        /// Human-readable description
        message: String,
        /// The offending expression source
        expression: String,
        /// Where parsing stopped, when known
        location: Option<SourceLocation>,
    },

    /// Evaluation failure (unknown function, rejected access, depth limit)
    #[error("evaluation error: {message}")]
    Eval {
        /// Human-readable description
        message: String,
    },
}

impl PapelError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            expression: expression.into(),
            location: None,
        }
    }

    /// Create a parse error with a source location
    pub fn parse_at(
        message: impl Into<String>,
        expression: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            expression: expression.into(),
            location: Some(location),
        }
    }

    /// Create an evaluation error
    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }

    /// The human-readable message, without the stage prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Parse { message, .. } | Self::Eval { message } => message,
        }
    }

    /// Whether this error was raised while parsing
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
