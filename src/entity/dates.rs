//! Date helpers for backend timestamps and form inputs
//!
//! Backend values are ISO-8601 strings, either full timestamps or plain
//! dates. Naive values are treated as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a backend or form timestamp; `None` when blank or invalid
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD` for a date input; invalid or missing dates give ""
pub fn to_date_input(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DDTHH:MM` for a date-time input; invalid or missing dates give ""
pub fn to_datetime_input(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// ISO timestamp with millisecond precision, as the backend stores them
pub fn to_iso(value: &str) -> Option<String> {
    parse_timestamp(value).map(format_iso)
}

pub fn format_iso(dt: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&dt)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole days from `start` to `end`, counting both endpoints
pub fn inclusive_days(start: &str, end: &str) -> Option<i64> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    Some((end - start).num_days() + 1)
}

/// `true` when `end` is strictly after `start`; unparseable input is never after
pub fn is_strictly_after(start: &str, end: &str) -> bool {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => end > start,
        _ => false,
    }
}

/// `Jun 10, 2024`
pub fn date_label(value: &str) -> Option<String> {
    parse_timestamp(value).map(|dt| dt.format("%b %d, %Y").to_string())
}

/// `Jun 10 - Jun 12, 2024`
pub fn period_label(start: &str, end: &str) -> Option<String> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    Some(format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y")))
}

/// Ordering key for "newest first" sorts; missing dates sort last
pub fn sort_key(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_shapes() {
        assert!(parse_timestamp("2024-06-10T08:30:00.000Z").is_some());
        assert!(parse_timestamp("2024-06-10T08:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-06-10T08:30").is_some());
        assert!(parse_timestamp("2024-06-10").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn input_formats_degrade_to_empty() {
        assert_eq!(to_date_input("2024-06-10T08:30:00.000Z"), "2024-06-10");
        assert_eq!(to_datetime_input("2024-06-10T08:30:00.000Z"), "2024-06-10T08:30");
        assert_eq!(to_date_input("garbage"), "");
        assert_eq!(to_datetime_input(""), "");
    }

    #[test]
    fn iso_round_trip_of_date_input() {
        assert_eq!(to_iso("2024-06-10").as_deref(), Some("2024-06-10T00:00:00.000Z"));
        assert_eq!(to_iso("2024-06-10T08:30").as_deref(), Some("2024-06-10T08:30:00.000Z"));
    }

    #[test]
    fn inclusive_duration() {
        assert_eq!(inclusive_days("2024-06-10", "2024-06-12"), Some(3));
        assert_eq!(inclusive_days("2024-06-10", "2024-06-10"), Some(1));
        assert_eq!(inclusive_days("2024-06-10", "bad"), None);
    }

    #[test]
    fn strict_ordering() {
        assert!(is_strictly_after("2024-06-05", "2024-06-10"));
        assert!(!is_strictly_after("2024-06-10", "2024-06-05"));
        assert!(!is_strictly_after("2024-06-10", "2024-06-10"));
    }

    #[test]
    fn labels() {
        assert_eq!(date_label("2024-06-10").as_deref(), Some("Jun 10, 2024"));
        assert_eq!(
            period_label("2024-06-10", "2024-06-12").as_deref(),
            Some("Jun 10 - Jun 12, 2024")
        );
    }
}
