//! CLI functionality for the papel tool
//!
//! This module contains the subcommand implementations:
//! - Document rendering
//! - One-off expression evaluation
//! - Template validation
//! - Output formatting

pub mod check;
pub mod eval;
pub mod output;
pub mod render;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Parse `name=value` pairs from the command line
///
/// The value side is read as JSON when possible, else taken as a plain
/// string, so `-p amount=250000` gives a number and `-p name=ada` a string.
pub(crate) fn parse_params(params: &[String]) -> Result<IndexMap<String, JsonValue>> {
    let mut out = IndexMap::new();
    for param in params {
        let (name, value) = param
            .split_once('=')
            .with_context(|| format!("invalid parameter '{param}', expected name=value"))?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::from(value));
        out.insert(name.to_string(), value);
    }
    Ok(out)
}

/// Parse the `--now` override as an RFC 3339 instant or a plain date
pub(crate) fn parse_now(now: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    use chrono::{DateTime, NaiveDate, Utc};

    if let Ok(instant) = DateTime::parse_from_rfc3339(now) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(now, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .with_context(|| format!("invalid --now value '{now}', expected RFC 3339 or YYYY-MM-DD"))
}
