//! Visibility predicate evaluator
//!
//! Each document element may carry an optional boolean-ish guard
//! expression. No guard means visible; a guard that cannot be parsed or
//! evaluated means hidden, since an element whose condition cannot be
//! computed should not silently appear.

use crate::catalog::FunctionCatalog;
use crate::context::EvaluationContext;
use crate::engine::evaluate;
use log::debug;
use papel_parser::parse_expression;

/// Decide whether an element guarded by `condition` is visible
pub fn is_visible(
    condition: Option<&str>,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
) -> bool {
    let Some(source) = condition else {
        return true;
    };
    if source.trim().is_empty() {
        return true;
    }

    let expr = match parse_expression(source) {
        Ok(expr) => expr,
        Err(err) => {
            debug!("visibility condition failed to parse, hiding element: {err}");
            return false;
        }
    };

    match evaluate(&expr, ctx, catalog) {
        Ok(value) => value.is_truthy(),
        Err(err) => {
            debug!("visibility condition failed to evaluate, hiding element: {err}");
            false
        }
    }
}
