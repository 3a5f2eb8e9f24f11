//! Evaluation context for expression execution

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use papel_types::Value;

/// The namespaces an expression evaluates against
///
/// Immutable for the duration of one evaluation. `vars` is fully resolved by
/// the dependency resolver before any consumer expression referencing it
/// runs; `row` carries the current iteration record when evaluating inside a
/// repeating structure (a table cell) and is absent otherwise.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    /// Caller-supplied input values
    pub inputs: IndexMap<String, Value>,
    /// Values fixed by the template author
    pub constants: IndexMap<String, Value>,
    /// Derived variables produced by the resolver
    pub vars: IndexMap<String, Value>,
    /// Current iteration record, when inside a repeating structure
    pub row: Option<IndexMap<String, Value>>,
    /// Fixed clock for reproducible `now()`, when set
    fixed_now: Option<DateTime<Utc>>,
}

impl EvaluationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input namespace
    pub fn with_inputs(mut self, inputs: IndexMap<String, Value>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the constants namespace
    pub fn with_constants(mut self, constants: IndexMap<String, Value>) -> Self {
        self.constants = constants;
        self
    }

    /// Set the derived-variable namespace
    pub fn with_vars(mut self, vars: IndexMap<String, Value>) -> Self {
        self.vars = vars;
        self
    }

    /// Set the current iteration record
    pub fn with_row(mut self, row: IndexMap<String, Value>) -> Self {
        self.row = Some(row);
        self
    }

    /// Pin `now()` to a fixed instant, for reproducible evaluation
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// The current instant: the pinned clock when set, else the system clock
    ///
    /// This is the only non-deterministic read in the whole subsystem.
    pub fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 29, 12, 0, 0).unwrap();
        let ctx = EvaluationContext::new().with_fixed_now(instant);
        assert_eq!(ctx.now(), instant);
        assert_eq!(ctx.now(), ctx.now());
    }
}
