//! Date and time builtins
//!
//! All date arithmetic is date-only and performed in UTC. Input that cannot
//! be read as a date yields the "no date" value rather than an error, and
//! formatting a no-date renders as the empty string.

use super::{arg, number_arg, string_arg};
use crate::catalog::FunctionCatalog;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike, Utc};
use papel_types::Value;
use std::sync::Arc;

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub(crate) fn register(catalog: &mut FunctionCatalog) {
    catalog.register("now", Arc::new(|_args, ctx| Ok(Value::Date(ctx.now()))));

    catalog.register(
        "addDays",
        Arc::new(|args, _ctx| {
            Ok(shift_date(args, |date, n| {
                date.checked_add_signed(Duration::days(n))
            }))
        }),
    );

    catalog.register(
        "addMonths",
        Arc::new(|args, _ctx| Ok(shift_date(args, add_months))),
    );

    catalog.register(
        "addYears",
        Arc::new(|args, _ctx| {
            Ok(shift_date(args, |date, n| add_months(date, n.checked_mul(12)?)))
        }),
    );

    catalog.register(
        "formatDate",
        Arc::new(|args, _ctx| {
            let Some(date) = parse_date(arg(args, 0)) else {
                return Ok(Value::String(String::new()));
            };
            let pattern = match arg(args, 1) {
                Value::Absent | Value::Null => "YYYY-MM-DD".to_string(),
                _ => string_arg(args, 1),
            };
            Ok(Value::String(format_date(&date, &pattern)))
        }),
    );
}

/// Read a value as a date, best effort
///
/// Accepts date values, numeric epoch milliseconds, `YYYY-MM-DD` strings
/// (interpreted as UTC midnight) and a few common date-time string shapes.
pub(crate) fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Number(n) if n.is_finite() => DateTime::from_timestamp_millis(*n as i64),
        Value::String(s) => parse_date_string(s.trim()),
        _ => None,
    }
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Shared shape of the date arithmetic builtins: parse the date and offset
/// arguments, apply `apply`, fall back to no-date on any failure
fn shift_date(
    args: &[Value],
    apply: impl Fn(DateTime<Utc>, i64) -> Option<DateTime<Utc>>,
) -> Value {
    let amount = number_arg(args, 1);
    if !amount.is_finite() {
        return Value::Null;
    }
    parse_date(arg(args, 0))
        .and_then(|date| apply(date, amount as i64))
        .map(Value::Date)
        .unwrap_or(Value::Null)
}

/// Month arithmetic clamps the day-of-month to the last valid day of the
/// resulting month (Jan 31 + 1 month lands on the last day of February)
fn add_months(date: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
    let months = Months::new(u32::try_from(n.unsigned_abs()).ok()?);
    if n >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    match pattern {
        "es" => format_spanish(date, "de"),
        "es-del" => format_spanish(date, "del"),
        _ => substitute_tokens(date, pattern),
    }
}

fn format_spanish(date: &DateTime<Utc>, year_connector: &str) -> String {
    let month = SPANISH_MONTHS[date.month0() as usize];
    format!(
        "{} de {} {} {}",
        date.day(),
        month,
        year_connector,
        date.year()
    )
}

/// Replace format tokens, longest token first so `YYYY` is not consumed as
/// two `YY`s; any other character passes through verbatim
fn substitute_tokens(date: &DateTime<Utc>, pattern: &str) -> String {
    let tokens: [(&str, String); 7] = [
        ("YYYY", format!("{:04}", date.year())),
        ("YY", format!("{:02}", date.year() % 100)),
        ("MM", format!("{:02}", date.month())),
        ("DD", format!("{:02}", date.day())),
        ("HH", format!("{:02}", date.hour())),
        ("mm", format!("{:02}", date.minute())),
        ("ss", format!("{:02}", date.second())),
    ];

    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        for (token, replacement) in &tokens {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }
    out
}
