//! Priority threshold filter

use super::operator::Operator;
use super::Filter;
use crate::core::{Event, LoggerError, Result, Severity};

/// Accepts events whose numeric severity satisfies `severity <op> threshold`.
///
/// With the default `<=` operator and lower-is-more-severe numbering, this
/// accepts events at least as severe as the threshold.
pub struct PriorityFilter {
    threshold: Severity,
    operator: Operator,
}

impl PriorityFilter {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            operator: Operator::default(),
        }
    }

    pub fn with_operator(threshold: Severity, operator: Operator) -> Self {
        Self {
            threshold,
            operator,
        }
    }

    /// Construct from a raw integer threshold and optional operator name.
    ///
    /// Fails with `InvalidArgument` when the threshold is outside [0,7]
    /// or the operator is unrecognized.
    pub fn from_raw(threshold: i64, operator: Option<&str>) -> Result<Self> {
        let threshold = Severity::try_from(threshold)?;
        let operator = match operator {
            Some(s) => s.parse::<Operator>().map_err(|_| {
                LoggerError::invalid_argument(
                    "PriorityFilter",
                    format!("unknown comparison operator '{}'", s),
                )
            })?,
            None => Operator::default(),
        };
        Ok(Self::with_operator(threshold, operator))
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }
}

impl Filter for PriorityFilter {
    fn accept(&self, event: &Event) -> bool {
        self.operator
            .compare(event.severity.value(), self.threshold.value())
    }

    fn name(&self) -> &str {
        "priority"
    }
}
