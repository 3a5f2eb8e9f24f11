//! Runtime values for papel template expressions
//!
//! Context values are a closed tagged union rather than an open dynamic type,
//! so the type system enforces the closed operation set of the expression
//! language. Member access is an explicit lookup against the mapping and
//! sequence variants only; there is no reflective property access to leak
//! host internals through.

mod coercion;
mod value;

pub use coercion::{compare_values, loose_eq, strict_eq, to_number};
pub use value::Value;
