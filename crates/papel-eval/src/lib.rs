//! Papel expression evaluation engine
//!
//! This crate is the core of the document-template system: a small,
//! deterministic, injection-safe interpreter for the restricted expression
//! language, plus the layers built directly on top of it:
//!
//! - **Evaluator** (`engine`): walks an AST node against an evaluation
//!   context and a function catalog, producing a dynamically-typed value or
//!   failing with a descriptive error.
//! - **Function catalog** (`catalog`, `functions`): a fixed library of pure,
//!   synchronous builtins, callable only by direct name; passed explicitly
//!   into every evaluation so nothing is ambient or mutable between calls.
//! - **Dependency resolver** (`resolver`): computes derived variables in
//!   dependency order regardless of declaration order, detecting cycles and
//!   isolating per-variable failures.
//! - **Template renderer** (`template`): substitutes `{{ expression }}`
//!   spans in free text; total, never fails.
//! - **Visibility predicate** (`visibility`): boolean guard per document
//!   element, fail-closed.
//!
//! Evaluation is synchronous and single-threaded per call, with no shared
//! mutable state between calls; independent evaluations may run on separate
//! threads as long as each gets its own context.

pub mod catalog;
pub mod context;
pub mod engine;
pub mod error;
pub mod functions;
pub mod resolver;
pub mod template;
pub mod visibility;

pub use catalog::{BuiltinFn, FunctionCatalog};
pub use context::EvaluationContext;
pub use engine::{MAX_RECURSION_DEPTH, evaluate};
pub use error::{EvalError, EvalResult};
pub use resolver::{VariableError, resolve_variables};
pub use template::{render, template_errors};
pub use visibility::is_visible;
