//! String builtins

use super::{arg, number_arg, string_arg};
use crate::catalog::FunctionCatalog;
use papel_types::Value;
use std::sync::Arc;

pub(crate) fn register(catalog: &mut FunctionCatalog) {
    catalog.register(
        "concat",
        Arc::new(|args, _ctx| {
            let mut out = String::new();
            for value in args {
                out.push_str(&value.to_display_string());
            }
            Ok(Value::String(out))
        }),
    );

    catalog.register(
        "upper",
        Arc::new(|args, _ctx| Ok(Value::String(string_arg(args, 0).to_uppercase()))),
    );

    catalog.register(
        "lower",
        Arc::new(|args, _ctx| Ok(Value::String(string_arg(args, 0).to_lowercase()))),
    );

    catalog.register(
        "trim",
        Arc::new(|args, _ctx| Ok(Value::String(string_arg(args, 0).trim().to_string()))),
    );

    catalog.register(
        "padStart",
        Arc::new(|args, _ctx| Ok(Value::String(pad(args, PadSide::Start)))),
    );

    catalog.register(
        "padEnd",
        Arc::new(|args, _ctx| Ok(Value::String(pad(args, PadSide::End)))),
    );

    catalog.register(
        "replace",
        Arc::new(|args, _ctx| {
            let value = string_arg(args, 0);
            let search = string_arg(args, 1);
            let replacement = string_arg(args, 2);
            // First occurrence only, search treated as literal text
            Ok(Value::String(value.replacen(&search, &replacement, 1)))
        }),
    );

    catalog.register(
        "substr",
        Arc::new(|args, _ctx| {
            let value = string_arg(args, 0);
            let chars: Vec<char> = value.chars().collect();

            let start = clamp_index(number_arg(args, 1), chars.len());
            let end = match arg(args, 2) {
                Value::Absent | Value::Null => chars.len(),
                length => {
                    let length = clamp_index(papel_types::to_number(length), chars.len());
                    (start + length).min(chars.len())
                }
            };

            Ok(Value::String(chars[start..end].iter().collect()))
        }),
    );
}

enum PadSide {
    Start,
    End,
}

/// Widest result `padStart`/`padEnd` will produce; a larger requested
/// length clamps here rather than allocating whatever the expression asked
/// for
const MAX_PAD_WIDTH: usize = 10_000;

fn pad(args: &[Value], side: PadSide) -> String {
    let value = string_arg(args, 0);
    let target = clamp_index(number_arg(args, 1), MAX_PAD_WIDTH);

    // Only the first character of the pad argument is used
    let pad_char = match arg(args, 2) {
        Value::Absent | Value::Null => ' ',
        other => other.to_display_string().chars().next().unwrap_or(' '),
    };

    let current = value.chars().count();
    if current >= target {
        return value;
    }

    let filler: String = std::iter::repeat(pad_char).take(target - current).collect();
    match side {
        PadSide::Start => filler + &value,
        PadSide::End => value + &filler,
    }
}

/// Coerce a numeric argument to a usable index: NaN and negatives clamp to
/// zero, overlong values clamp to `max`
fn clamp_index(n: f64, max: usize) -> usize {
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= max as f64 {
        max
    } else {
        n as usize
    }
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

    #[test]
    fn test_concat() {
        assert_eq!(
            call(
                "concat",
                &[
                    Value::String("a".into()),
                    Value::Number(1.0),
                    Value::Absent,
                    Value::Null,
                    Value::Bool(true),
                ]
            ),
            Value::String("a1true".into())
        );
        assert_eq!(call("concat", &[]), Value::String(String::new()));
    }

    #[rstest]
    #[case("upper", "Hola", "HOLA")]
    #[case("lower", "HoLa", "hola")]
    #[case("trim", "  padded  ", "padded")]
    fn casing_and_trim(#[case] name: &str, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            call(name, &[Value::String(input.into())]),
            Value::String(expected.into())
        );
    }

    #[test]
    fn test_case_fold_on_absent_is_empty() {
        assert_eq!(call("upper", &[Value::Absent]), Value::String(String::new()));
        assert_eq!(call("lower", &[Value::Null]), Value::String(String::new()));
        assert_eq!(call("trim", &[]), Value::String(String::new()));
    }

    #[test]
    fn test_pad_start() {
        assert_eq!(
            call(
                "padStart",
                &[Value::String("7".into()), Value::Number(3.0), Value::String("0".into())]
            ),
            Value::String("007".into())
        );
        // Default pad is a single space
        assert_eq!(
            call("padStart", &[Value::String("x".into()), Value::Number(3.0)]),
            Value::String("  x".into())
        );
        // Already long enough: unchanged
        assert_eq!(
            call("padStart", &[Value::String("long".into()), Value::Number(2.0)]),
            Value::String("long".into())
        );
        // Only the first pad character is used
        assert_eq!(
            call(
                "padStart",
                &[Value::String("x".into()), Value::Number(3.0), Value::String("ab".into())]
            ),
            Value::String("aax".into())
        );
    }

    #[test]
    fn test_pad_width_is_bounded() {
        // An absurd requested length clamps instead of allocating it
        let Value::String(padded) = call(
            "padStart",
            &[Value::String("x".into()), Value::Number(1e15)],
        ) else {
            panic!("expected a string");
        };
        assert_eq!(padded.chars().count(), MAX_PAD_WIDTH);
        assert!(padded.ends_with('x'));
    }

    #[test]
    fn test_pad_end() {
        assert_eq!(
            call(
                "padEnd",
                &[Value::String("7".into()), Value::Number(3.0), Value::String("-".into())]
            ),
            Value::String("7--".into())
        );
    }

    #[test]
    fn test_replace_first_literal_occurrence() {
        assert_eq!(
            call(
                "replace",
                &[
                    Value::String("a.b.a.b".into()),
                    Value::String("a.b".into()),
                    Value::String("X".into()),
                ]
            ),
            Value::String("X.a.b".into())
        );
        // No regex interpretation of the search text
        assert_eq!(
            call(
                "replace",
                &[
                    Value::String("1x2".into()),
                    Value::String(".".into()),
                    Value::String("-".into()),
                ]
            ),
            Value::String("1x2".into())
        );
    }

    #[rstest]
    #[case(&[Value::String("hello".into()), Value::Number(1.0), Value::Number(3.0)], "ell")]
    #[case(&[Value::String("hello".into()), Value::Number(1.0)], "ello")]
    #[case(&[Value::String("hello".into()), Value::Number(-2.0)], "hello")]
    #[case(&[Value::String("hello".into()), Value::Number(10.0)], "")]
    #[case(&[Value::String("hello".into()), Value::Number(3.0), Value::Number(99.0)], "lo")]
    fn substr_clamps(#[case] args: &[Value], #[case] expected: &str) {
        assert_eq!(call("substr", args), Value::String(expected.into()));
    }
}
