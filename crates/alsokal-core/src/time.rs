//! Lenient parsing for the date strings found in data files.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a data-file timestamp into a UTC instant.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC), or a
/// bare `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else, which
/// callers treat as "matches no time window".
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar date of a data-file timestamp.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_instant(raw).map(|dt| dt.date_naive())
}

/// Signed milliseconds from `from` to `to`.
#[must_use]
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds()
}
