//! The expression evaluator
//!
//! Walks an AST node against an evaluation context and a function catalog.
//! The evaluator never mutates the context; coercion producing NaN is a
//! valid result, and unknown identifiers resolve to the absent sentinel so
//! that forward references degrade gracefully in authoring UIs.

use crate::catalog::FunctionCatalog;
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use indexmap::IndexMap;
use papel_ast::{
    BinaryExpr, BinaryOp, CallExpr, Expression, Literal, LogicalExpr, LogicalOp, MemberExpr,
    MemberProp, UnaryExpr, UnaryOp,
};
use papel_types::{Value, compare_values, loose_eq, strict_eq, to_number};
use std::cmp::Ordering;

/// Maximum expression nesting depth
///
/// Guards the recursive walk against pathological or maliciously deep input.
pub const MAX_RECURSION_DEPTH: usize = 64;

/// Property names that always resolve to absent, closing the
/// prototype-pollution information leak even for mappings that literally
/// contain such keys
const BLOCKED_PROPS: [&str; 3] = ["__proto__", "prototype", "constructor"];

/// Evaluate an expression against a context and catalog
pub fn evaluate(
    expr: &Expression,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
) -> EvalResult<Value> {
    eval_expr(expr, ctx, catalog, 0)
}

fn eval_expr(
    expr: &Expression,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
    depth: usize,
) -> EvalResult<Value> {
    if depth >= MAX_RECURSION_DEPTH {
        return Err(EvalError::RecursionLimit);
    }

    match expr {
        Expression::Literal(lit) => Ok(eval_literal(lit)),
        Expression::Identifier(id) => Ok(resolve_identifier(&id.name, ctx)),
        Expression::Unary(unary) => eval_unary(unary, ctx, catalog, depth),
        Expression::Binary(binary) => eval_binary(binary, ctx, catalog, depth),
        Expression::Logical(logical) => eval_logical(logical, ctx, catalog, depth),
        Expression::Conditional(cond) => {
            let condition = eval_expr(&cond.condition, ctx, catalog, depth + 1)?;
            // Exactly one branch runs, never both
            if condition.is_truthy() {
                eval_expr(&cond.then_expr, ctx, catalog, depth + 1)
            } else {
                eval_expr(&cond.else_expr, ctx, catalog, depth + 1)
            }
        }
        Expression::Member(member) => eval_member(member, ctx, catalog, depth),
        Expression::Call(call) => eval_call(call, ctx, catalog, depth),
        Expression::Array(array) => {
            let mut elements = Vec::with_capacity(array.elements.len());
            for element in &array.elements {
                elements.push(eval_expr(element, ctx, catalog, depth + 1)?);
            }
            Ok(Value::List(elements))
        }
        Expression::Object(object) => {
            let mut entries = IndexMap::with_capacity(object.entries.len());
            for entry in &object.entries {
                let value = eval_expr(&entry.value, ctx, catalog, depth + 1)?;
                // Duplicate keys overwrite earlier entries
                entries.insert(entry.key.clone(), value);
            }
            Ok(Value::Map(entries))
        }
    }
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
    }
}

/// Resolve an identifier, in order: reserved namespace names, reserved
/// words, otherwise absent
///
/// Unknown names resolve to absent rather than failing so that templates
/// referencing not-yet-defined variables still render. A function name
/// outside call position also resolves to absent: functions are not values.
fn resolve_identifier(name: &str, ctx: &EvaluationContext) -> Value {
    match name {
        "inputs" => Value::Map(ctx.inputs.clone()),
        "constants" => Value::Map(ctx.constants.clone()),
        "vars" => Value::Map(ctx.vars.clone()),
        "row" => ctx.row.clone().map(Value::Map).unwrap_or(Value::Absent),
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => Value::Absent,
    }
}

fn eval_unary(
    unary: &UnaryExpr,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
    depth: usize,
) -> EvalResult<Value> {
    let operand = eval_expr(&unary.operand, ctx, catalog, depth + 1)?;
    Ok(match unary.op {
        UnaryOp::Not => Value::Bool(!operand.is_truthy()),
        UnaryOp::Plus => Value::Number(to_number(&operand)),
        UnaryOp::Minus => Value::Number(-to_number(&operand)),
    })
}

fn eval_binary(
    binary: &BinaryExpr,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
    depth: usize,
) -> EvalResult<Value> {
    let left = eval_expr(&binary.left, ctx, catalog, depth + 1)?;
    let right = eval_expr(&binary.right, ctx, catalog, depth + 1)?;

    Ok(match binary.op {
        BinaryOp::Add => {
            // A string operand makes `+` concatenation; otherwise numeric.
            if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                let mut out = left.to_display_string();
                out.push_str(&right.to_display_string());
                Value::String(out)
            } else {
                Value::Number(to_number(&left) + to_number(&right))
            }
        }
        // Division by zero follows IEEE semantics, not an error
        BinaryOp::Subtract => Value::Number(to_number(&left) - to_number(&right)),
        BinaryOp::Multiply => Value::Number(to_number(&left) * to_number(&right)),
        BinaryOp::Divide => Value::Number(to_number(&left) / to_number(&right)),
        BinaryOp::Modulo => Value::Number(to_number(&left) % to_number(&right)),
        BinaryOp::Less => compare_to_bool(&left, &right, Ordering::is_lt),
        BinaryOp::LessOrEqual => compare_to_bool(&left, &right, Ordering::is_le),
        BinaryOp::Greater => compare_to_bool(&left, &right, Ordering::is_gt),
        BinaryOp::GreaterOrEqual => compare_to_bool(&left, &right, Ordering::is_ge),
        BinaryOp::Equal => Value::Bool(loose_eq(&left, &right)),
        BinaryOp::NotEqual => Value::Bool(!loose_eq(&left, &right)),
        BinaryOp::StrictEqual => Value::Bool(strict_eq(&left, &right)),
        BinaryOp::StrictNotEqual => Value::Bool(!strict_eq(&left, &right)),
    })
}

/// Unordered operands (NaN involved) make every relational operator false
fn compare_to_bool(left: &Value, right: &Value, test: impl Fn(Ordering) -> bool) -> Value {
    Value::Bool(compare_values(left, right).is_some_and(test))
}

fn eval_logical(
    logical: &LogicalExpr,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
    depth: usize,
) -> EvalResult<Value> {
    let left = eval_expr(&logical.left, ctx, catalog, depth + 1)?;

    // Short-circuit: the right operand is not evaluated when the left side
    // decides the result, which also suppresses its errors
    match logical.op {
        LogicalOp::And => {
            if left.is_truthy() {
                eval_expr(&logical.right, ctx, catalog, depth + 1)
            } else {
                Ok(left)
            }
        }
        LogicalOp::Or => {
            if left.is_truthy() {
                Ok(left)
            } else {
                eval_expr(&logical.right, ctx, catalog, depth + 1)
            }
        }
    }
}

/// Dot-only member access against the mapping and sequence variants
///
/// Anything else (scalars, dates, missing keys, out-of-range indexes)
/// resolves to absent. Bracket access is rejected outright.
fn eval_member(
    member: &MemberExpr,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
    depth: usize,
) -> EvalResult<Value> {
    let name = match &member.property {
        MemberProp::Name(name) => name,
        MemberProp::Computed(_) => return Err(EvalError::ComputedAccess),
    };

    let object = eval_expr(&member.object, ctx, catalog, depth + 1)?;

    if BLOCKED_PROPS.contains(&name.as_str()) {
        return Ok(Value::Absent);
    }

    Ok(match object {
        Value::Map(entries) => entries.get(name).cloned().unwrap_or(Value::Absent),
        Value::List(items) => name
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned())
            .unwrap_or(Value::Absent),
        _ => Value::Absent,
    })
}

/// Calls are resolved purely by name through the catalog; calling the
/// result of any other expression form is rejected
fn eval_call(
    call: &CallExpr,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
    depth: usize,
) -> EvalResult<Value> {
    let name = match call.callee.as_ref() {
        Expression::Identifier(id) => &id.name,
        _ => return Err(EvalError::IndirectCall),
    };

    let func = catalog
        .get(name)
        .ok_or_else(|| EvalError::unknown_function(name))?;

    // Arguments evaluate eagerly, left to right, before invocation
    let mut args = Vec::with_capacity(call.arguments.len());
    for argument in &call.arguments {
        args.push(eval_expr(argument, ctx, catalog, depth + 1)?);
    }

    func(&args, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use papel_parser::parse_expression;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn eval(source: &str) -> EvalResult<Value> {
        let ctx = EvaluationContext::new()
            .with_inputs(
                [
                    ("amount".to_string(), Value::Number(250000.0)),
                    ("name".to_string(), Value::String("ada".into())),
                    ("zero".to_string(), Value::Number(0.0)),
                ]
                .into_iter()
                .collect(),
            )
            .with_constants(
                [("tax".to_string(), Value::Number(0.08))]
                    .into_iter()
                    .collect(),
            );
        let catalog = FunctionCatalog::new();
        evaluate(&parse_expression(source).unwrap(), &ctx, &catalog)
    }

    #[rstest]
    #[case("1 + 2", Value::Number(3.0))]
    #[case("'5' + '3'", Value::String("53".into()))]
    #[case("'5' - '3'", Value::Number(2.0))]
    #[case("2 * 3 + 1", Value::Number(7.0))]
    #[case("7 % 4", Value::Number(3.0))]
    #[case("'total: ' + 5", Value::String("total: 5".into()))]
    fn arithmetic_and_concat(#[case] source: &str, #[case] expected: Value) {
        assert_eq!(eval(source).unwrap(), expected);
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert_eq!(eval("1 / 0").unwrap(), Value::Number(f64::INFINITY));
        match eval("0 / 0").unwrap() {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[rstest]
    #[case("1 < 2", true)]
    #[case("2 <= 2", true)]
    #[case("'abc' < 'abd'", true)]
    #[case("'10' > 9", true)]
    #[case("'x' < 1", false)]
    #[case("'x' >= 1", false)]
    fn comparisons(#[case] source: &str, #[case] expected: bool) {
        assert_eq!(eval(source).unwrap(), Value::Bool(expected));
    }

    #[rstest]
    #[case("5 == '5'", true)]
    #[case("5 === '5'", false)]
    #[case("5 !== '5'", true)]
    #[case("null == inputs.nothing", true)]
    #[case("null === inputs.nothing", false)]
    fn equality(#[case] source: &str, #[case] expected: bool) {
        assert_eq!(eval(source).unwrap(), Value::Bool(expected));
    }

    #[test]
    fn test_logical_returns_operand() {
        assert_eq!(eval("0 || 'fallback'").unwrap(), Value::String("fallback".into()));
        assert_eq!(eval("'left' || 'right'").unwrap(), Value::String("left".into()));
        assert_eq!(eval("0 && 'right'").unwrap(), Value::Number(0.0));
        assert_eq!(eval("1 && 'right'").unwrap(), Value::String("right".into()));
    }

    #[test]
    fn test_short_circuit_suppresses_errors() {
        // The right side would fail with an unknown function
        assert_eq!(eval("'x' || frobnicate()").unwrap(), Value::String("x".into()));
        assert_eq!(eval("0 && frobnicate()").unwrap(), Value::Number(0.0));
        assert_eq!(
            eval("1 && frobnicate()").unwrap_err(),
            EvalError::unknown_function("frobnicate")
        );
    }

    #[test]
    fn test_conditional_evaluates_one_branch() {
        assert_eq!(eval("1 ? 'yes' : frobnicate()").unwrap(), Value::String("yes".into()));
        assert_eq!(eval("0 ? frobnicate() : 'no'").unwrap(), Value::String("no".into()));
    }

    #[test]
    fn test_namespace_access() {
        assert_eq!(eval("inputs.amount").unwrap(), Value::Number(250000.0));
        assert_eq!(eval("constants.tax").unwrap(), Value::Number(0.08));
        assert_eq!(eval("inputs.missing").unwrap(), Value::Absent);
        assert_eq!(eval("row").unwrap(), Value::Absent);
        assert_eq!(eval("row.anything").unwrap(), Value::Absent);
    }

    #[test]
    fn test_unknown_identifier_is_absent() {
        assert_eq!(eval("not_a_thing").unwrap(), Value::Absent);
        // A function name outside call position is not a value
        assert_eq!(eval("upper").unwrap(), Value::Absent);
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(eval("true").unwrap(), Value::Bool(true));
        assert_eq!(eval("false").unwrap(), Value::Bool(false));
        assert_eq!(eval("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(eval("!0").unwrap(), Value::Bool(true));
        assert_eq!(eval("!'text'").unwrap(), Value::Bool(false));
        assert_eq!(eval("-inputs.amount").unwrap(), Value::Number(-250000.0));
        assert_eq!(eval("+'12'").unwrap(), Value::Number(12.0));
        match eval("+'abc'").unwrap() {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[test]
    fn test_array_and_object_literals() {
        assert_eq!(
            eval("[1, 'two'].1").unwrap(),
            Value::String("two".into())
        );
        assert_eq!(eval("{a: 1, b: 2}.b").unwrap(), Value::Number(2.0));
        // Duplicate keys: later wins
        assert_eq!(eval("{a: 1, a: 2}.a").unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_member_on_scalar_is_absent() {
        assert_eq!(eval("inputs.amount.anything").unwrap(), Value::Absent);
        assert_eq!(eval("[1, 2].5").unwrap(), Value::Absent);
        assert_eq!(eval("[1, 2].x").unwrap(), Value::Absent);
    }

    #[rstest]
    #[case("inputs.__proto__")]
    #[case("constants.prototype")]
    #[case("{constructor: 1}.constructor")]
    fn blocked_properties_are_absent(#[case] source: &str) {
        assert_eq!(eval(source).unwrap(), Value::Absent);
    }

    #[test]
    fn test_computed_access_rejected() {
        assert_eq!(eval("inputs['amount']").unwrap_err(), EvalError::ComputedAccess);
    }

    #[test]
    fn test_indirect_call_rejected() {
        assert_eq!(eval("inputs.name()").unwrap_err(), EvalError::IndirectCall);
        assert_eq!(eval("[upper].0('x')").unwrap_err(), EvalError::IndirectCall);
        // Parentheses around a bare name collapse, leaving a direct call
        assert_eq!(eval("(upper)('x')").unwrap(), Value::String("X".into()));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            eval("frobnicate(1)").unwrap_err(),
            EvalError::unknown_function("frobnicate")
        );
    }

    #[test]
    fn test_recursion_limit() {
        // Parenthesised groups collapse in the AST, so force nesting with
        // unary operators
        let deep = format!("{}1", "-".repeat(MAX_RECURSION_DEPTH + 1));
        let expr = parse_expression(&deep).unwrap();
        let ctx = EvaluationContext::new();
        let catalog = FunctionCatalog::new();
        assert_eq!(
            evaluate(&expr, &ctx, &catalog).unwrap_err(),
            EvalError::RecursionLimit
        );
    }

    #[test]
    fn test_purity_repeated_evaluation() {
        let expr = parse_expression("inputs.amount + inputs.amount * constants.tax").unwrap();
        let ctx = EvaluationContext::new()
            .with_inputs(
                [("amount".to_string(), Value::Number(250000.0))]
                    .into_iter()
                    .collect(),
            )
            .with_constants(
                [("tax".to_string(), Value::Number(0.08))]
                    .into_iter()
                    .collect(),
            );
        let catalog = FunctionCatalog::new();

        let first = evaluate(&expr, &ctx, &catalog).unwrap();
        for _ in 0..10 {
            assert_eq!(evaluate(&expr, &ctx, &catalog).unwrap(), first);
        }
        assert_eq!(first, Value::Number(270000.0));
    }
}
