//! Regex message filter

use super::Filter;
use crate::core::{Event, LoggerError, Result};
use regex::Regex;

/// Accepts events whose message matches the configured pattern.
///
/// The pattern is compiled at construction time; a pattern that does not
/// compile is an `InvalidArgument` error wrapping the compile failure.
#[derive(Debug)]
pub struct RegexFilter {
    pattern: Regex,
}

impl RegexFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            LoggerError::invalid_argument("RegexFilter", format!("invalid pattern: {}", e))
        })?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Filter for RegexFilter {
    fn accept(&self, event: &Event) -> bool {
        self.pattern.is_match(&event.message)
    }

    fn name(&self) -> &str {
        "regex"
    }
}
