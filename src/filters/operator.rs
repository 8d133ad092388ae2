//! Comparison operators for threshold filters

use crate::core::LoggerError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator shared by the priority and timestamp filters.
///
/// The default is `<=`: on the 0..=7 scale lower values are more severe,
/// so `<=` accepts events at least as severe as the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Default)]
pub enum Operator {
    Lt,
    #[default]
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Operator {
    pub fn compare(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Operator::Lt => lhs < rhs,
            Operator::Le => lhs <= rhs,
            Operator::Gt => lhs > rhs,
            Operator::Ge => lhs >= rhs,
            Operator::Eq => lhs == rhs,
            Operator::Ne => lhs != rhs,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" | "lt" => Ok(Operator::Lt),
            "<=" | "le" => Ok(Operator::Le),
            ">" | "gt" => Ok(Operator::Gt),
            ">=" | "ge" => Ok(Operator::Ge),
            "==" | "=" | "eq" => Ok(Operator::Eq),
            "!=" | "<>" | "ne" => Ok(Operator::Ne),
            other => Err(LoggerError::invalid_argument(
                "Operator",
                format!("unknown comparison operator '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare() {
        assert!(Operator::Le.compare(2, 2));
        assert!(Operator::Lt.compare(1, 2));
        assert!(!Operator::Lt.compare(2, 2));
        assert!(Operator::Ne.compare(1, 2));
        assert!(Operator::Eq.compare(3, 3));
        assert!(Operator::Ge.compare(5, 5));
    }

    #[test]
    fn test_parse_symbols_and_aliases() {
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::Le);
        assert_eq!("le".parse::<Operator>().unwrap(), Operator::Le);
        assert_eq!("gt".parse::<Operator>().unwrap(), Operator::Gt);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::Ne);
        assert!("~=".parse::<Operator>().is_err());
    }

    #[test]
    fn test_default_is_le() {
        assert_eq!(Operator::default(), Operator::Le);
    }
}
