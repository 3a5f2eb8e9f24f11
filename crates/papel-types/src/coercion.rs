//! Deterministic coercion rules for the expression operators
//!
//! These rules are the contract of the whole subsystem: identical inputs
//! always produce identical outputs, and coercion to "not-a-number" is a
//! valid value, never a failure.

use crate::Value;
use std::cmp::Ordering;

/// Coerce a value to a number
///
/// Already-numeric values pass through; non-empty, fully-numeric strings
/// parse to their value; everything else (including the empty string,
/// objects, absent and null) coerces to NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                f64::NAN
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

/// Strict equality: no coercion, values must match in type and content
///
/// NaN never equals NaN, matching IEEE semantics.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    left == right
}

/// Loose equality with coercion
///
/// Null and absent are mutually equal; strings and numbers cross-coerce
/// numerically; booleans only equal booleans; structured values fall back
/// to structural equality.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null | Value::Absent, Value::Null | Value::Absent) => true,
        (Value::Null | Value::Absent, _) | (_, Value::Null | Value::Absent) => false,
        (Value::Number(n), Value::String(_)) => *n == to_number(right),
        (Value::String(_), Value::Number(n)) => to_number(left) == *n,
        _ => left == right,
    }
}

/// Relational comparison for `< <= > >=`
///
/// Two strings compare lexicographically and two dates chronologically;
/// every other pairing coerces both sides to numbers. `None` means the
/// operands are unordered (a NaN was involved), which makes every relational
/// operator false.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        _ => {
            let a = to_number(left);
            let b = to_number(right);
            a.partial_cmp(&b)
        }
    }
}
