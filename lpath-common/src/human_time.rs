//! Clock-style time formatting for playback labels
//!
//! Playback positions are reported by the embedded player as fractional
//! seconds. The modal shows them as `M:SS` with whole minutes unbounded
//! (a 75 minute lesson reads `75:00`, not `1:15:00`).
//!
//! Also reads the dates the course API attaches to accounts and completions.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format seconds as `M:SS`.
///
/// Fractions are truncated. Negative, NaN and infinite inputs render as
/// `0:00` since the player reports them before metadata is available.
///
/// # Examples
///
/// ```
/// use lpath_common::human_time::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(59.9), "0:59");
/// assert_eq!(format_clock(61.0), "1:01");
/// assert_eq!(format_clock(4500.0), "75:00");
/// ```
pub fn format_clock(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let minutes = whole / 60;
    let secs = whole % 60;
    format!("{}:{:02}", minutes, secs)
}

/// Format the `current / total` label shown next to the transport controls.
///
/// # Examples
///
/// ```
/// use lpath_common::human_time::format_position_label;
///
/// assert_eq!(format_position_label(12.4, 120.0), "0:12 / 2:00");
/// ```
pub fn format_position_label(current: f64, duration: f64) -> String {
    format!("{} / {}", format_clock(current), format_clock(duration))
}

/// Date part of a course API timestamp.
///
/// Accepts RFC 3339 and the offset-less ISO 8601 form the server emits
/// (`2024-03-05T10:20:30.123456`), or a bare date.
///
/// # Examples
///
/// ```
/// use lpath_common::human_time::parse_api_date;
///
/// let date = parse_api_date("2024-03-05T10:20:30").unwrap();
/// assert_eq!(date.format("%B %Y").to_string(), "March 2024");
/// assert!(parse_api_date("yesterday").is_none());
/// ```
pub fn parse_api_date(timestamp: &str) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_fractional_seconds() {
        assert_eq!(format_clock(0.999), "0:00");
        assert_eq!(format_clock(9.5), "0:09");
        assert_eq!(format_clock(119.99), "1:59");
    }

    #[test]
    fn test_pads_seconds_to_two_digits() {
        assert_eq!(format_clock(5.0), "0:05");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(3599.0), "59:59");
    }

    #[test]
    fn test_minutes_are_unbounded() {
        assert_eq!(format_clock(3600.0), "60:00");
        assert_eq!(format_clock(7322.0), "122:02");
    }

    #[test]
    fn test_invalid_inputs_render_as_zero() {
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_position_label() {
        assert_eq!(format_position_label(0.0, 0.0), "0:00 / 0:00");
        assert_eq!(format_position_label(119.0, 120.0), "1:59 / 2:00");
    }

    #[test]
    fn test_parse_api_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_api_date("2024-03-05T10:20:30.123456"), expected);
        assert_eq!(parse_api_date("2024-03-05T10:20:30"), expected);
        assert_eq!(parse_api_date("2024-03-05T10:20:30+00:00"), expected);
        assert_eq!(parse_api_date("2024-03-05"), expected);
        assert_eq!(parse_api_date(""), None);
    }
}
