//! Severity level definitions
//!
//! An 8-level syslog-style scale where 0 is the most severe (emergency)
//! and 7 the least severe (debug).

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Severity::Emergency => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRIT",
            Severity::Error => "ERR",
            Severity::Warning => "WARN",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Numeric value on the 0..=7 scale. Lower is more severe.
    pub fn value(&self) -> i64 {
        *self as i64
    }

    /// True if `self` is at least as severe as `other` (numerically `<=`)
    pub fn at_least(&self, other: Severity) -> bool {
        self.value() <= other.value()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<i64> for Severity {
    type Error = LoggerError;

    fn try_from(value: i64) -> Result<Self, LoggerError> {
        match value {
            0 => Ok(Severity::Emergency),
            1 => Ok(Severity::Alert),
            2 => Ok(Severity::Critical),
            3 => Ok(Severity::Error),
            4 => Ok(Severity::Warning),
            5 => Ok(Severity::Notice),
            6 => Ok(Severity::Info),
            7 => Ok(Severity::Debug),
            other => Err(LoggerError::invalid_argument(
                "Severity",
                format!("priority {} is outside the valid range [0,7]", other),
            )),
        }
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EMERG" | "EMERGENCY" => Ok(Severity::Emergency),
            "ALERT" => Ok(Severity::Alert),
            "CRIT" | "CRITICAL" => Ok(Severity::Critical),
            "ERR" | "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warning),
            "NOTICE" => Ok(Severity::Notice),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            other => Err(LoggerError::invalid_argument(
                "Severity",
                format!("unknown severity name '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_scale() {
        assert_eq!(Severity::Emergency.value(), 0);
        assert_eq!(Severity::Debug.value(), 7);
        for (i, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(severity.value(), i as i64);
        }
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        for value in [-1_i64, 8, 100, i64::MIN] {
            let err = Severity::try_from(value).unwrap_err();
            assert!(err.to_string().contains(&value.to_string()));
        }
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(Severity::Emergency.name(), "EMERG");
        assert_eq!(Severity::Error.name(), "ERR");
        assert_eq!(Severity::Debug.name(), "DEBUG");
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("err".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_at_least() {
        assert!(Severity::Alert.at_least(Severity::Error));
        assert!(Severity::Error.at_least(Severity::Error));
        assert!(!Severity::Debug.at_least(Severity::Error));
    }
}
