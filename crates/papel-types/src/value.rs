//! The papel runtime value

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// A dynamically-typed runtime value
///
/// `Absent` is the sentinel for "no binding found" and is distinct from an
/// explicit `null` supplied by the template author; both propagate through
/// expressions without raising.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No binding found (distinct from null)
    Absent,
    /// Explicit null
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (IEEE 754 double)
    Number(f64),
    /// String value
    String(String),
    /// Date/time value (UTC)
    Date(DateTime<Utc>),
    /// Ordered sequence
    List(Vec<Value>),
    /// String-keyed mapping, insertion-ordered
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Whether this is the absent sentinel
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether this is absent or null ("missing" for the builtin helpers)
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Absent | Self::Null)
    }

    /// Truthiness: absent, null, false, 0, NaN and the empty string are
    /// falsy; everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Date(_) | Self::List(_) | Self::Map(_) => true,
        }
    }

    /// A short name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::List(_) => "list",
            Self::Map(_) => "object",
        }
    }

    /// Stringify for display in rendered documents
    ///
    /// Absent and null render as the empty string; structured values render
    /// as JSON text.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Absent | Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Date(d) => d.to_rfc3339_opts(SecondsFormat::Millis, true),
            Self::List(_) | Self::Map(_) => self.to_json().to_string(),
        }
    }

    /// Convert a parsed JSON value into a runtime value, verbatim
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Self::String(s.clone()),
            JsonValue::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            JsonValue::Object(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Structural serialization to JSON
    ///
    /// Absent becomes null, as do NaN and infinities (JSON has no
    /// representation for them); dates become RFC 3339 strings.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Absent | Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Format a number the way template authors expect: integral values without
/// a trailing fraction, non-finite values spelled out
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        // Rust's shortest-roundtrip Display already prints 5.0 as "5"
        n.to_string()
    }
}
