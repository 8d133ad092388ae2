//! Flattening formatter and the shared flattening rules
//!
//! Canonical stringification used by every templated formatter:
//! lists become bracketed JSON-like lists (`[]` when empty), booleans
//! become `"1"`/`""`, nulls are omitted rather than rendered as "null",
//! timestamps are rendered with the configured date format, and maps are
//! rendered through their JSON form.

use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat, Value};
use std::collections::BTreeMap;

/// Recursion cap for nested extra data. The value tree is owned, so true
/// cycles cannot be built, but pathologically deep nesting still bails
/// out to an empty string instead of recursing further.
const MAX_DEPTH: usize = 32;

/// Render a single value to its canonical string form.
///
/// Returns `None` for null values, which are omitted from textual output.
pub(crate) fn flatten_value(
    value: &Value,
    timestamp_format: &TimestampFormat,
    depth: usize,
) -> Option<String> {
    if depth > MAX_DEPTH {
        return Some(String::new());
    }
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Timestamp(ts) => Some(timestamp_format.format(ts)),
        Value::List(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| flatten_value(item, timestamp_format, depth + 1).unwrap_or_default())
                .collect();
            Some(format!("[{}]", parts.join(", ")))
        }
        Value::Map(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .filter_map(|(key, val)| {
                    flatten_value(val, timestamp_format, depth + 1)
                        .map(|rendered| format!("{}: {}", key, rendered))
                })
                .collect();
            Some(format!("{{{}}}", parts.join(", ")))
        }
    }
}

/// Render an extra map to one canonical string, omitting null entries
pub(crate) fn flatten_extra(
    extra: &BTreeMap<String, Value>,
    timestamp_format: &TimestampFormat,
) -> String {
    flatten_value(&Value::Map(extra.clone()), timestamp_format, 0).unwrap_or_default()
}

/// Formatter that flattens every non-scalar value in the event.
///
/// The result is a structured record whose `extra` values are all strings
/// (or null), ready for sinks that need scalar fields.
pub struct BaseFormatter {
    timestamp_format: TimestampFormat,
}

impl BaseFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    fn flatten_tree(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::Null => Value::Null,
            other => match flatten_value(other, &self.timestamp_format, depth) {
                Some(rendered) => Value::String(rendered),
                None => Value::Null,
            },
        }
    }
}

impl Default for BaseFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for BaseFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let mut flattened = event.clone();
        flattened.extra = event
            .extra
            .iter()
            .map(|(key, val)| (key.clone(), self.flatten_tree(val, 0)))
            .collect();
        Formatted::Record(flattened)
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use chrono::TimeZone;

    #[test]
    fn test_scalar_flattening() {
        let fmt = TimestampFormat::default();
        assert_eq!(flatten_value(&Value::from(3), &fmt, 0).unwrap(), "3");
        assert_eq!(flatten_value(&Value::from(true), &fmt, 0).unwrap(), "1");
        assert_eq!(flatten_value(&Value::from(false), &fmt, 0).unwrap(), "");
        assert_eq!(flatten_value(&Value::Null, &fmt, 0), None);
    }

    #[test]
    fn test_list_flattening() {
        let fmt = TimestampFormat::default();
        let list = Value::from(vec![Value::from(1), Value::from("x")]);
        assert_eq!(flatten_value(&list, &fmt, 0).unwrap(), "[1, x]");

        let empty = Value::List(vec![]);
        assert_eq!(flatten_value(&empty, &fmt, 0).unwrap(), "[]");
    }

    #[test]
    fn test_timestamp_uses_configured_format() {
        let ts = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .unwrap();
        let rendered = flatten_value(
            &Value::Timestamp(ts),
            &TimestampFormat::Custom("%Y-%m-%d".to_string()),
            0,
        )
        .unwrap();
        assert_eq!(rendered, "2025-01-08");
    }

    #[test]
    fn test_nested_map_omits_nulls() {
        let fmt = TimestampFormat::default();
        let mut inner = BTreeMap::new();
        inner.insert("code".to_string(), Value::from(7));
        inner.insert("gone".to_string(), Value::Null);
        let rendered = flatten_value(&Value::Map(inner), &fmt, 0).unwrap();
        assert_eq!(rendered, "{code: 7}");
    }

    #[test]
    fn test_deep_nesting_bails_out() {
        let mut value = Value::from("leaf");
        for _ in 0..100 {
            value = Value::List(vec![value]);
        }
        // Must terminate; past the cap the rendering degrades to empty.
        let rendered = flatten_value(&Value::List(vec![value]), &TimestampFormat::default(), 0);
        assert!(rendered.is_some());
    }

    #[test]
    fn test_format_produces_flat_record() {
        let event = Event::new(Severity::Info, "m")
            .with_extra_field("tags", Value::from(vec!["a", "b"]))
            .with_extra_field("n", 4);

        let formatter = BaseFormatter::new();
        let Formatted::Record(flat) = formatter.format(&event) else {
            panic!("expected record");
        };

        assert_eq!(flat.extra["tags"], Value::from("[a, b]"));
        assert_eq!(flat.extra["n"], Value::from("4"));
        assert!(flat.extra.values().all(Value::is_scalar));
    }
}
