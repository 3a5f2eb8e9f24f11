//! Numeric builtins
//!
//! Non-numeric input yields NaN rather than raising; NaN then flows through
//! arithmetic per IEEE rules.

use super::number_arg;
use crate::catalog::FunctionCatalog;
use papel_types::{Value, to_number};
use std::sync::Arc;

pub(crate) fn register(catalog: &mut FunctionCatalog) {
    catalog.register(
        "abs",
        Arc::new(|args, _ctx| Ok(Value::Number(number_arg(args, 0).abs()))),
    );

    catalog.register(
        "round",
        Arc::new(|args, _ctx| {
            // Half-up rounding: 2.5 rounds to 3 and -2.5 rounds to -2
            Ok(Value::Number((number_arg(args, 0) + 0.5).floor()))
        }),
    );

    catalog.register(
        "floor",
        Arc::new(|args, _ctx| Ok(Value::Number(number_arg(args, 0).floor()))),
    );

    catalog.register(
        "ceil",
        Arc::new(|args, _ctx| Ok(Value::Number(number_arg(args, 0).ceil()))),
    );

    catalog.register(
        "min",
        Arc::new(|args, _ctx| Ok(Value::Number(fold_extreme(args, f64::INFINITY, f64::min)))),
    );

    catalog.register(
        "max",
        Arc::new(|args, _ctx| Ok(Value::Number(fold_extreme(args, f64::NEG_INFINITY, f64::max)))),
    );
}

/// Fold every argument through `pick`, propagating NaN
///
/// `f64::min`/`f64::max` ignore NaN, so it is checked explicitly.
fn fold_extreme(args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> f64 {
    let mut extreme = init;
    for value in args {
        let n = to_number(value);
        if n.is_nan() {
            return f64::NAN;
        }
        extreme = pick(extreme, n);
    }
    extreme
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EvaluationContext;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn call(name: &str, args: &[Value]) -> Value {
        let catalog = FunctionCatalog::new();
        let ctx = EvaluationContext::new();
        catalog.get(name).unwrap()(args, &ctx).unwrap()
    }

    fn num(name: &str, args: &[Value]) -> f64 {
        match call(name, args) {
            Value::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[rstest]
    #[case("abs", -4.5, 4.5)]
    #[case("abs", 4.5, 4.5)]
    #[case("round", 2.5, 3.0)]
    #[case("round", -2.5, -2.0)]
    #[case("round", 2.4, 2.0)]
    #[case("floor", 2.9, 2.0)]
    #[case("floor", -2.1, -3.0)]
    #[case("ceil", 2.1, 3.0)]
    #[case("ceil", -2.9, -2.0)]
    fn rounding(#[case] name: &str, #[case] input: f64, #[case] expected: f64) {
        assert_eq!(num(name, &[Value::Number(input)]), expected);
    }

    #[test]
    fn test_non_numeric_input_is_nan() {
        assert!(num("abs", &[Value::String("text".into())]).is_nan());
        assert!(num("round", &[Value::Absent]).is_nan());
        assert!(num("floor", &[]).is_nan());
    }

    #[test]
    fn test_string_numbers_coerce() {
        assert_eq!(num("round", &[Value::String(" 2.6 ".into())]), 3.0);
    }

    #[test]
    fn test_min_max() {
        let args = [Value::Number(3.0), Value::Number(-1.0), Value::Number(2.0)];
        assert_eq!(num("min", &args), -1.0);
        assert_eq!(num("max", &args), 3.0);
    }

    #[test]
    fn test_min_max_nan_propagates() {
        let args = [Value::Number(1.0), Value::String("x".into())];
        assert!(num("min", &args).is_nan());
        assert!(num("max", &args).is_nan());
    }

    #[test]
    fn test_min_max_empty() {
        assert_eq!(num("min", &[]), f64::INFINITY);
        assert_eq!(num("max", &[]), f64::NEG_INFINITY);
    }
}
