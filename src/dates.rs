use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use crate::claim::Value;

lazy_static! {
    // Optional trailing time of day, e.g. "2024-01-01 00:00:00" or "2024-01-01T08:30"
    static ref ISO_DATE_REGEX: Regex = Regex::new(
        r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})(?:[ T]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?$"
    )
    .unwrap();
    static ref US_DATE_REGEX: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{4})(?: \d{1,2}:\d{2}(?::\d{2})?(?: ?[AaPp][Mm])?)?$"
    )
    .unwrap();
    static ref COMPACT_DATE_REGEX: Regex = Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap();
}

/// Largest serial number a spreadsheet can represent (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Parse free-form date text the way a spreadsheet user is likely to have typed it.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, month-first `MM/DD/YYYY` and compact
/// `YYYYMMDD`, each optionally followed by a time of day which is discarded.
/// Returns `None` for anything else, including impossible calendar dates.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    let (y, m, d) = if let Some(caps) = ISO_DATE_REGEX.captures(text) {
        (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
    } else if let Some(caps) = US_DATE_REGEX.captures(text) {
        (caps[3].parse().ok()?, caps[1].parse().ok()?, caps[2].parse().ok()?)
    } else if let Some(caps) = COMPACT_DATE_REGEX.captures(text) {
        (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
    } else {
        return None;
    };

    NaiveDate::from_ymd_opt(y, m, d)
}

/// Parse the strict `YYYY-MM-DD` form produced by HTML date inputs.
pub fn parse_date_input(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Convert a spreadsheet serial day number into a calendar date.
///
/// Day 0 is 1899-12-30, which absorbs the historical 1900 leap-year bug for
/// every date after February 1900. The fractional part (time of day) is dropped.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Coerce a loaded cell to a date value, degrading to `Value::Empty` on failure.
pub fn coerce_date(value: Value) -> Value {
    let date = match &value {
        Value::Date(date) => Some(*date),
        Value::Text(text) => parse_date_text(text),
        // 20240320 is past the serial range; read it as compact YYYYMMDD
        Value::Number(n) => from_serial(*n).or_else(|| parse_date_text(&value.to_string())),
        Value::Bool(_) | Value::Empty => None,
    };

    match date {
        Some(date) => Value::Date(date),
        None => Value::Empty,
    }
}
