//! Row-insert formatter

use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat, Value};

/// Produces a structured record for row-insert writers.
///
/// Every embedded timestamp value (including the event timestamp mirrored
/// into `extra` by some processors) is replaced by its string rendering;
/// the shape of the event is otherwise unchanged.
pub struct DbFormatter {
    timestamp_format: TimestampFormat,
}

impl DbFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    fn render_timestamps(&self, value: &Value) -> Value {
        match value {
            Value::Timestamp(ts) => Value::String(self.timestamp_format.format(ts)),
            Value::List(items) => {
                Value::List(items.iter().map(|item| self.render_timestamps(item)).collect())
            }
            Value::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, val)| (key.clone(), self.render_timestamps(val)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl Default for DbFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for DbFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let mut record = event.clone();
        record.extra = event
            .extra
            .iter()
            .map(|(key, val)| (key.clone(), self.render_timestamps(val)))
            .collect();
        Formatted::Record(record)
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}
