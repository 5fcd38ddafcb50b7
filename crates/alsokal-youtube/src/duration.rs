//! ISO 8601 video durations (`PT#H#M#S`).

use std::sync::LazyLock;

use regex::Regex;

/// Videos at or under this length count as shorts.
pub const SHORT_MAX_SECS: u64 = 60;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration regex")
});

/// Total seconds of a `PT#H#M#S` duration, or `None` if it doesn't parse
/// or has no components.
#[must_use]
pub fn duration_secs(raw: &str) -> Option<u64> {
    let caps = DURATION_RE.captures(raw.trim())?;
    if caps.iter().skip(1).all(|m| m.is_none()) {
        return None;
    }
    let part = |i: usize| -> Option<u64> {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };
    let hours = part(1)?;
    let minutes = part(2)?;
    let seconds = part(3)?;
    hours
        .checked_mul(3_600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Unparseable durations (including live streams' `P0D`) are not shorts.
#[must_use]
pub fn is_short(raw: &str) -> bool {
    duration_secs(raw).is_some_and(|secs| secs <= SHORT_MAX_SECS)
}
