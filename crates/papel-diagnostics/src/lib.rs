//! Error handling and source diagnostics for papel
//!
//! Errors are split by stage: parse failures (malformed expression syntax)
//! and evaluation failures. Both carry a human-readable message; nothing in
//! this workspace is fatal to a hosting application.

mod error;
mod span;

pub use error::{PapelError, Result};
pub use span::{SourceLocation, offset_to_line_col};
