//! Papel: expression evaluation and template rendering for JSON-described
//! documents
//!
//! A document template declares inputs, constants, derived variables and a
//! body of text elements. Rendering substitutes `{{ expression }}` spans
//! using a restricted, injection-safe expression language: no loops, no
//! assignment, no user-defined functions, no host-object access and no I/O
//! during evaluation.
//!
//! # Example
//!
//! ```
//! use papel::{EvaluationContext, FunctionCatalog, render};
//! use papel::Value;
//!
//! let ctx = EvaluationContext::new().with_inputs(
//!     [("name".to_string(), Value::String("ada".into()))]
//!         .into_iter()
//!         .collect(),
//! );
//! let catalog = FunctionCatalog::new();
//!
//! let text = render("Hello {{ upper(inputs.name) }}!", &ctx, &catalog);
//! assert_eq!(text, "Hello ADA!");
//! ```

// Re-export the public APIs of the internal crates
pub use papel_ast as ast;
pub use papel_diagnostics as diagnostics;
pub use papel_eval as eval;
pub use papel_parser as parser;
pub use papel_types as types;

// Convenience re-exports
pub use papel_diagnostics::{PapelError, Result};
pub use papel_eval::{
    EvaluationContext, FunctionCatalog, VariableError, evaluate, is_visible, render,
    resolve_variables, template_errors,
};
pub use papel_parser::parse_expression;
pub use papel_types::Value;

pub mod document;
pub use document::{DocumentTemplate, InputDefinition, RenderedDocument, TextElement};

// CLI module (only available with the cli feature)
#[cfg(feature = "cli")]
pub mod cli;
