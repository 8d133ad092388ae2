//! Event structure flowing through the pipeline

use super::severity::Severity;
use super::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One structured log record.
///
/// Events are created by the [`Logger`](crate::core::Logger) per log call,
/// flow synchronously through processors then writers, and are discarded
/// when the call returns. Processors return revised copies; filters and
/// formatters treat the event as an immutable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Event {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, extra: BTreeMap<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn with_extra_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Human-readable label for the severity, derived from the level table
    pub fn severity_name(&self) -> &'static str {
        self.severity.name()
    }

    /// Insert a derived field only when the caller has not supplied one.
    ///
    /// This is the contract request-id style processors rely on: existing
    /// `extra` keys always win over derived values.
    pub fn set_extra_if_absent(&mut self, key: &str, value: Value) {
        if !self.extra.contains_key(key) {
            self.extra.insert(key.to_string(), value);
        }
    }
}
