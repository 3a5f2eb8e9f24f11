//! Function catalog for the evaluation engine
//!
//! The catalog is an explicit value passed into every evaluation call rather
//! than ambient static state, so evaluation stays pure and testable and
//! callers can customize the library per call. Function identity is resolved
//! purely by name lookup at call time; no expression form produces a
//! function.

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use papel_types::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Type alias for builtin function implementations
///
/// Implementations must be pure and synchronous; excess or missing arguments
/// are coerced, not rejected.
pub type BuiltinFn = Arc<dyn Fn(&[Value], &EvaluationContext) -> EvalResult<Value> + Send + Sync>;

/// Mapping from function name to implementation
#[derive(Clone)]
pub struct FunctionCatalog {
    functions: HashMap<String, BuiltinFn>,
}

impl Default for FunctionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionCatalog {
    /// Create a catalog with the standard builtin library registered
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        crate::functions::register_builtins(&mut catalog);
        catalog
    }

    /// Create a catalog with no functions
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register a function, replacing any existing one with the same name
    pub fn register(&mut self, name: impl Into<String>, implementation: BuiltinFn) {
        self.functions.insert(name.into(), implementation);
    }

    /// Look up a function implementation by name
    pub fn get(&self, name: &str) -> Option<&BuiltinFn> {
        self.functions.get(name)
    }

    /// Whether a function with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names of all registered functions, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}
