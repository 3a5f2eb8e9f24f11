//! Derived-variable dependency resolver
//!
//! Given a mapping of variable names to expression source text, computes
//! each variable in dependency order regardless of declaration order. A
//! dependency graph is derived per call from static `vars.<name>` reads and
//! discarded afterward; nothing persists between calls.
//!
//! Failure isolation: a variable whose expression fails to parse or
//! evaluate records an error and is simply never written, and its
//! dependents still evaluate (seeing it as absent). A dependency cycle
//! records one error naming the variable where the cycle closed and leaves
//! every variable on the cycle unset.

use crate::catalog::FunctionCatalog;
use crate::context::EvaluationContext;
use crate::engine::evaluate;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use papel_ast::{Expression, MemberProp};
use papel_parser::parse_expression;
use papel_types::Value;
use std::collections::HashMap;
use thiserror::Error;

/// A per-variable resolution failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variable '{variable}': {message}")]
pub struct VariableError {
    /// Name of the variable the failure is attributed to
    pub variable: String,
    /// Human-readable failure description
    pub message: String,
}

impl VariableError {
    fn new(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            message: message.into(),
        }
    }
}

/// Resolve derived variables in dependency order
///
/// Returns the successfully computed variables plus an ordered list of
/// per-variable errors. The output map contains only entries that computed
/// cleanly; expressions reading an unresolved variable see absent.
pub fn resolve_variables(
    definitions: &IndexMap<String, String>,
    base: &EvaluationContext,
    catalog: &FunctionCatalog,
) -> (IndexMap<String, Value>, Vec<VariableError>) {
    let mut parsed = HashMap::with_capacity(definitions.len());
    for (name, source) in definitions {
        parsed.insert(name.as_str(), parse_expression(source));
    }

    let mut resolver = Resolver {
        definitions,
        parsed,
        marks: HashMap::new(),
        values: IndexMap::new(),
        errors: Vec::new(),
        base,
        catalog,
    };

    for name in definitions.keys() {
        resolver.visit(name);
    }

    (resolver.values, resolver.errors)
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

enum VisitOutcome {
    Resolved,
    Failed,
    /// A cycle was detected; carries the name of the variable where the
    /// walk re-entered, so unwinding knows where the cycle closes
    Cycle(String),
}

struct Resolver<'a> {
    definitions: &'a IndexMap<String, String>,
    parsed: HashMap<&'a str, papel_diagnostics::Result<Expression>>,
    marks: HashMap<String, Mark>,
    values: IndexMap<String, Value>,
    errors: Vec<VariableError>,
    base: &'a EvaluationContext,
    catalog: &'a FunctionCatalog,
}

impl Resolver<'_> {
    fn visit(&mut self, name: &str) -> VisitOutcome {
        match self.marks.get(name) {
            Some(Mark::Visiting) => {
                warn!("variable '{name}' participates in a dependency cycle");
                self.errors.push(VariableError::new(
                    name,
                    "circular dependency detected",
                ));
                return VisitOutcome::Cycle(name.to_string());
            }
            Some(Mark::Done) => {
                return if self.values.contains_key(name) {
                    VisitOutcome::Resolved
                } else {
                    VisitOutcome::Failed
                };
            }
            None => {}
        }

        let expr = match self.parsed.get(name) {
            Some(Ok(expr)) => expr.clone(),
            Some(Err(err)) => {
                let message = err.message().to_string();
                self.marks.insert(name.to_string(), Mark::Done);
                self.errors.push(VariableError::new(name, message));
                return VisitOutcome::Failed;
            }
            // Not a defined variable: nothing to compute
            None => return VisitOutcome::Failed,
        };

        self.marks.insert(name.to_string(), Mark::Visiting);

        // Declared dependencies first; a failed dependency does not block
        // this variable, it just reads as absent
        for dep in direct_dependencies(&expr) {
            if !self.definitions.contains_key(&dep) {
                continue;
            }
            if let VisitOutcome::Cycle(origin) = self.visit(&dep) {
                // Every variable on the active chain is part of the cycle
                // and stays unset; propagation stops where the cycle closed
                self.marks.insert(name.to_string(), Mark::Done);
                return if origin == name {
                    VisitOutcome::Failed
                } else {
                    VisitOutcome::Cycle(origin)
                };
            }
        }

        self.marks.insert(name.to_string(), Mark::Done);

        let ctx = self.base.clone().with_vars(self.values.clone());
        match evaluate(&expr, &ctx, self.catalog) {
            Ok(value) => {
                debug!("resolved variable '{name}'");
                self.values.insert(name.to_string(), value);
                VisitOutcome::Resolved
            }
            Err(err) => {
                warn!("variable '{name}' failed to evaluate: {err}");
                self.errors.push(VariableError::new(name, err.to_string()));
                VisitOutcome::Failed
            }
        }
    }
}

/// Collect the names read as `vars.<name>` anywhere in an expression
///
/// One level of static lookup only; transitive dependencies are discovered
/// by the recursive visit itself. First-read order is kept so error
/// reporting stays deterministic.
fn direct_dependencies(expr: &Expression) -> IndexSet<String> {
    let mut deps = IndexSet::new();
    collect_deps(expr, &mut deps);
    deps
}

fn collect_deps(expr: &Expression, deps: &mut IndexSet<String>) {
    match expr {
        Expression::Member(member) => {
            if let (Expression::Identifier(id), MemberProp::Name(prop)) =
                (member.object.as_ref(), &member.property)
                && id.name == "vars"
            {
                deps.insert(prop.clone());
            }
            collect_deps(&member.object, deps);
            if let MemberProp::Computed(inner) = &member.property {
                collect_deps(inner, deps);
            }
        }
        Expression::Unary(unary) => collect_deps(&unary.operand, deps),
        Expression::Binary(binary) => {
            collect_deps(&binary.left, deps);
            collect_deps(&binary.right, deps);
        }
        Expression::Logical(logical) => {
            collect_deps(&logical.left, deps);
            collect_deps(&logical.right, deps);
        }
        Expression::Conditional(cond) => {
            collect_deps(&cond.condition, deps);
            collect_deps(&cond.then_expr, deps);
            collect_deps(&cond.else_expr, deps);
        }
        Expression::Call(call) => {
            collect_deps(&call.callee, deps);
            for argument in &call.arguments {
                collect_deps(argument, deps);
            }
        }
        Expression::Array(array) => {
            for element in &array.elements {
                collect_deps(element, deps);
            }
        }
        Expression::Object(object) => {
            for entry in &object.entries {
                collect_deps(&entry.value, deps);
            }
        }
        Expression::Literal(_) | Expression::Identifier(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn defs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(pairs: &[(&str, &str)]) -> (IndexMap<String, Value>, Vec<VariableError>) {
        let base = EvaluationContext::new().with_inputs(
            [("amount".to_string(), Value::Number(250000.0))]
                .into_iter()
                .collect(),
        );
        resolve_variables(&defs(pairs), &base, &FunctionCatalog::new())
    }

    #[test]
    fn test_independent_variables() {
        let (vars, errors) = resolve(&[("a", "1 + 1"), ("b", "inputs.amount")]);
        assert_eq!(errors, vec![]);
        assert_eq!(vars.get("a"), Some(&Value::Number(2.0)));
        assert_eq!(vars.get("b"), Some(&Value::Number(250000.0)));
    }

    #[test]
    fn test_forward_reference() {
        // a is declared first but depends on b
        let (vars, errors) = resolve(&[("a", "vars.b * 2"), ("b", "21")]);
        assert_eq!(errors, vec![]);
        assert_eq!(vars.get("a"), Some(&Value::Number(42.0)));
        assert_eq!(vars.get("b"), Some(&Value::Number(21.0)));
    }

    #[test]
    fn test_chained_dependencies() {
        let (vars, errors) = resolve(&[
            ("total", "vars.subtotal + vars.tax"),
            ("tax", "vars.subtotal * 0.08"),
            ("subtotal", "inputs.amount"),
        ]);
        assert_eq!(errors, vec![]);
        assert_eq!(vars.get("total"), Some(&Value::Number(270000.0)));
    }

    #[test]
    fn test_two_variable_cycle() {
        let (vars, errors) = resolve(&[("a", "vars.b"), ("b", "vars.a")]);
        // Exactly one error, both variables unset
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "circular dependency detected");
        assert!(vars.is_empty());
    }

    #[test]
    fn test_self_cycle() {
        let (vars, errors) = resolve(&[("a", "vars.a + 1")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].variable, "a");
        assert!(vars.is_empty());
    }

    #[test]
    fn test_cycle_does_not_block_siblings() {
        let (vars, errors) = resolve(&[("a", "vars.b"), ("b", "vars.a"), ("c", "3")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("c"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn test_dependent_of_cycle_sees_absent() {
        let (vars, errors) = resolve(&[("a", "vars.b"), ("b", "vars.a"), ("c", "vars.a == null")]);
        assert_eq!(errors.len(), 1);
        // c is outside the cycle, so it still computes, with vars.a absent
        assert_eq!(vars.get("c"), Some(&Value::Bool(true)));
        assert!(!vars.contains_key("a"));
        assert!(!vars.contains_key("b"));
    }

    #[test]
    fn test_parse_failure_is_isolated() {
        let (vars, errors) = resolve(&[("broken", "1 +"), ("fine", "2")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].variable, "broken");
        assert_eq!(vars.get("fine"), Some(&Value::Number(2.0)));
        assert!(!vars.contains_key("broken"));
    }

    #[test]
    fn test_eval_failure_is_isolated() {
        let (vars, errors) = resolve(&[("bad", "frobnicate()"), ("uses_bad", "vars.bad == null")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].variable, "bad");
        assert_eq!(errors[0].message, "unknown function: frobnicate");
        // The dependent still evaluates, seeing the failed variable as absent
        assert_eq!(vars.get("uses_bad"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_undefined_dependency_is_absent() {
        let (vars, errors) = resolve(&[("a", "vars.nothing == null")]);
        assert_eq!(errors, vec![]);
        assert_eq!(vars.get("a"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_no_persistent_state_between_calls() {
        let base = EvaluationContext::new();
        let catalog = FunctionCatalog::new();
        let definitions = defs(&[("a", "vars.b + 1"), ("b", "1")]);

        let first = resolve_variables(&definitions, &base, &catalog);
        let second = resolve_variables(&definitions, &base, &catalog);
        assert_eq!(first, second);
        assert_eq!(first.0.get("a"), Some(&Value::Number(2.0)));
    }
}
