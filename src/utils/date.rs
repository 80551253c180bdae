//! Publish date parsing.
//!
//! Frontmatter and git both hand us strings; everything downstream works
//! with `DateTime<Utc>` so index ordering is a plain comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a publish date from `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, or full
/// RFC 3339 (with offset) form.
///
/// Date-only and offset-less values are taken as UTC midnight / UTC wall
/// time. Returns `None` for anything unparseable so callers can fall through
/// to the provenance lookup.
pub fn parse_published(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Convert unix seconds (e.g. a git commit time) to `DateTime<Utc>`.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_published("2024-06-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_utc() {
        let dt = parse_published("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        // Offsets normalize to UTC; +08:00 at 10:00 is 02:00 UTC
        let dt = parse_published("2024-06-15T10:00:00+08:00").unwrap();
        assert_eq!(dt.hour(), 2);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_published("2024-06-15T14:30:45").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T14:30:45+00:00");
    }

    #[test]
    fn test_parse_whitespace_tolerant() {
        assert!(parse_published("  2024-01-01  ").is_some());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_published("").is_none());
        assert!(parse_published("yesterday").is_none());
        assert!(parse_published("2024-13-40").is_none());
        assert!(parse_published("2024/06/15").is_none());
    }

    #[test]
    fn test_from_unix_seconds() {
        let dt = from_unix_seconds(0).unwrap();
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_ordering_via_chrono() {
        let a = parse_published("2024-01-01").unwrap();
        let b = parse_published("2024-06-15T00:00:01Z").unwrap();
        assert!(a < b);
    }
}
