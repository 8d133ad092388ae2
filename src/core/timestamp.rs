//! Timestamp rendering for formatters
//!
//! Every formatter observes its configured `TimestampFormat` whenever it
//! renders a timestamp value embedded anywhere in an event, including
//! timestamps nested inside `extra`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Date-rendering format specifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z` (default)
    #[default]
    Iso8601,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format string
    Custom(String),
}

impl TimestampFormat {
    /// Render a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_formats() {
        let seconds: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix timestamp");
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix millis");
        assert_eq!(millis, seconds * 1000 + 123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Iso8601);
    }
}
