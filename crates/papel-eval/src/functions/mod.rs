//! Builtin function library
//!
//! A fixed catalog of pure, synchronous named functions, grouped by category.
//! Every builtin is variadic-tolerant: excess arguments are ignored and
//! missing arguments are treated as absent, then coerced per the function's
//! own rules rather than rejected.

mod datetime;
mod missing;
mod numeric;
mod string;

use crate::catalog::FunctionCatalog;
use papel_types::{Value, to_number};

/// Register the standard builtin library into a catalog
pub fn register_builtins(catalog: &mut FunctionCatalog) {
    string::register(catalog);
    numeric::register(catalog);
    datetime::register(catalog);
    missing::register(catalog);
}

/// Positional argument, absent when not supplied
fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Absent)
}

/// Positional argument stringified; absent and null become the empty string
fn string_arg(args: &[Value], index: usize) -> String {
    arg(args, index).to_display_string()
}

/// Positional argument coerced to a number; may be NaN
fn number_arg(args: &[Value], index: usize) -> f64 {
    to_number(arg(args, index))
}
