//! Timestamp threshold filter

use super::operator::Operator;
use super::Filter;
use crate::core::{Event, LoggerError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Date part a timestamp can be reduced to before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
    Weekday,
}

impl DatePart {
    /// Parse the single-character and long-form specifiers
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "s" | "second" => Ok(DatePart::Second),
            "i" | "minute" => Ok(DatePart::Minute),
            "H" | "hour" => Ok(DatePart::Hour),
            "d" | "day" => Ok(DatePart::Day),
            "m" | "month" => Ok(DatePart::Month),
            "Y" | "year" => Ok(DatePart::Year),
            "N" | "weekday" => Ok(DatePart::Weekday),
            other => Err(LoggerError::invalid_argument(
                "TimestampFilter",
                format!("unknown date part specifier '{}'", other),
            )),
        }
    }

    fn extract(&self, ts: &DateTime<Utc>) -> i64 {
        match self {
            DatePart::Second => i64::from(ts.second()),
            DatePart::Minute => i64::from(ts.minute()),
            DatePart::Hour => i64::from(ts.hour()),
            DatePart::Day => i64::from(ts.day()),
            DatePart::Month => i64::from(ts.month()),
            DatePart::Year => i64::from(ts.year()),
            // ISO numbering: Monday = 1 .. Sunday = 7
            DatePart::Weekday => i64::from(ts.weekday().number_from_monday()),
        }
    }
}

enum Reference {
    /// Compare the event timestamp against a fixed instant
    Moment(DateTime<Utc>),
    /// Reduce the event timestamp to a date part, then compare the integer
    Part(DatePart, i64),
}

/// Accepts events whose timestamp satisfies the configured comparison.
pub struct TimestampFilter {
    reference: Reference,
    operator: Operator,
}

impl TimestampFilter {
    /// Compare event timestamps against a point-in-time reference
    pub fn at_moment(moment: DateTime<Utc>, operator: Operator) -> Self {
        Self {
            reference: Reference::Moment(moment),
            operator,
        }
    }

    /// Compare a date part of the event timestamp against an integer value
    pub fn at_date_part(part: DatePart, value: i64, operator: Operator) -> Self {
        Self {
            reference: Reference::Part(part, value),
            operator,
        }
    }

    /// Construct from raw string inputs, validating the date part and
    /// operator names at setup time.
    pub fn from_raw(part: &str, value: i64, operator: Option<&str>) -> Result<Self> {
        let part = DatePart::parse(part)?;
        let operator = match operator {
            Some(s) => s.parse::<Operator>()?,
            None => Operator::default(),
        };
        Ok(Self::at_date_part(part, value, operator))
    }
}

impl Filter for TimestampFilter {
    fn accept(&self, event: &Event) -> bool {
        match &self.reference {
            Reference::Moment(moment) => self
                .operator
                .compare(event.timestamp.timestamp(), moment.timestamp()),
            Reference::Part(part, value) => {
                self.operator.compare(part.extract(&event.timestamp), *value)
            }
        }
    }

    fn name(&self) -> &str {
        "timestamp"
    }
}
