//! Parsing of the instants written by the feed.
//!
//! The crawler and the site history writer do not agree on a single format:
//! rows carry `2025-11-07 15:42`, metadata carries Python `isoformat()` output
//! such as `2025-11-07T15:42:10.123456`, and some documents carry RFC 3339 with
//! an offset. Everything is resolved to Shanghai wall-clock time.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const SHANGHAI_UTC_OFFSET_HOURS: i64 = 8;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a feed instant into Shanghai local time.
///
/// Values with an explicit offset are converted to +08:00; values without one
/// are taken to already be local. A bare date resolves to midnight.
///
/// ```
/// use chrono::NaiveDate;
/// use shanghai_tourist::parse_feed_instant;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 11, 7)
///     .unwrap()
///     .and_hms_opt(15, 42, 0)
///     .unwrap();
/// assert_eq!(parse_feed_instant("2025-11-07 15:42"), Some(expected));
/// assert_eq!(parse_feed_instant("2025-11-07T07:42:00Z"), Some(expected));
/// assert_eq!(parse_feed_instant("soon"), None);
/// ```
pub fn parse_feed_instant(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc() + Duration::hours(SHANGHAI_UTC_OFFSET_HOURS));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Short axis label used by the trend charts, e.g. `11/7 9:05`.
pub fn chart_label(instant: &NaiveDateTime) -> String {
    instant.format("%-m/%-d %-H:%M").to_string()
}
