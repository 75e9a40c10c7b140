// src/dates.rs

//! Calendar-day arithmetic over timezone-naive `YYYY-MM-DD` dates.
//!
//! Everything here fails soft: an unparsable date never produces an error,
//! it produces a neutral value (0 days, the input unchanged, or `None`).

use chrono::{Days, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string. Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Inclusive number of calendar days covered by `start..=end`.
///
/// Returns 0 when either side is unparsable or when `end` is before `start`.
/// Callers must read 0 as "unscheduled", not as a zero-length task.
pub fn duration_days(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) if e >= s => e.signed_duration_since(s).num_days() + 1,
        _ => 0,
    }
}

/// Shift a parsed date by `n` days in either direction.
pub fn shift(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    }
}

/// Shift a date string by `n` days; unparsable input comes back unchanged.
pub fn add_days(date: &str, n: i64) -> String {
    parse_date(date)
        .and_then(|d| shift(d, n))
        .map(format_date)
        .unwrap_or_else(|| date.to_string())
}

/// Signed day difference `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// The earlier of two optional dates; an absent date loses to a present one.
pub fn earlier(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(d), None) | (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}

/// The later of two optional dates; an absent date loses to a present one.
pub fn later(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(d), None) | (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}
