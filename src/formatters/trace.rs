//! Exception trace formatter

use super::base::flatten_value;
use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat, Value};

/// Key under which a captured trace is expected in `extra`
pub const TRACE_KEY: &str = "trace";

/// Renders a one-line summary followed by a multi-frame trace dump.
///
/// The trace is read from `extra["trace"]`, a list of frame maps with
/// `file`, `line`, `function`, `module`, `static` and `args` entries.
/// Missing entries render as `-`.
pub struct TraceFormatter {
    timestamp_format: TimestampFormat,
}

impl TraceFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    fn frame_field<'a>(frame: &'a Value, key: &str) -> Option<&'a Value> {
        match frame {
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    fn render_field(&self, frame: &Value, key: &str) -> String {
        Self::frame_field(frame, key)
            .and_then(|value| flatten_value(value, &self.timestamp_format, 0))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Human label for the call type: associated (static) vs instance
    fn render_call_type(frame: &Value) -> &'static str {
        match Self::frame_field(frame, "static") {
            Some(Value::Bool(true)) => "static",
            _ => "instance",
        }
    }

    fn render_args(&self, frame: &Value) -> String {
        let Some(Value::List(args)) = Self::frame_field(frame, "args") else {
            return "    Args : -".to_string();
        };
        if args.is_empty() {
            return "    Args : -".to_string();
        }
        let mut lines = vec!["    Args :".to_string()];
        for (idx, arg) in args.iter().enumerate() {
            let rendered = flatten_value(arg, &self.timestamp_format, 0).unwrap_or_default();
            lines.push(format!("      #{:<3} {}", idx, rendered));
        }
        lines.join("\n")
    }

    fn render_frame(&self, idx: usize, frame: &Value) -> String {
        format!(
            "  #{}\n    File : {}\n    Line : {}\n    Func : {}\n    Module : {}\n    Type : {}\n{}",
            idx,
            self.render_field(frame, "file"),
            self.render_field(frame, "line"),
            self.render_field(frame, "function"),
            self.render_field(frame, "module"),
            Self::render_call_type(frame),
            self.render_args(frame),
        )
    }
}

impl Default for TraceFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TraceFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let summary = format!(
            "{} {} ({}): {}",
            self.timestamp_format.format(&event.timestamp),
            event.severity_name(),
            event.severity.value(),
            event.message,
        );

        let Some(Value::List(frames)) = event.extra.get(TRACE_KEY) else {
            return Formatted::Text(summary);
        };

        let mut output = summary;
        output.push_str("\nTrace:");
        for (idx, frame) in frames.iter().enumerate() {
            output.push('\n');
            output.push_str(&self.render_frame(idx, frame));
        }
        Formatted::Text(output)
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
    use std::collections::BTreeMap;

    fn frame(file: &str, line: i64, function: &str, is_static: bool) -> Value {
        let mut map = BTreeMap::new();
        map.insert("file".to_string(), Value::from(file));
        map.insert("line".to_string(), Value::from(line));
        map.insert("function".to_string(), Value::from(function));
        map.insert("module".to_string(), Value::from("app::io"));
        map.insert("static".to_string(), Value::from(is_static));
        map.insert("args".to_string(), Value::from(vec!["arg0", "arg1"]));
        Value::Map(map)
    }

    #[test]
    fn test_summary_without_trace() {
        let event = Event::new(Severity::Error, "boom");
        let output = TraceFormatter::new().format(&event).into_text();

        assert!(output.contains("ERR (3): boom"));
        assert!(!output.contains("Trace:"));
    }

    #[test]
    fn test_frame_dump() {
        let event = Event::new(Severity::Error, "boom").with_extra_field(
            TRACE_KEY,
            Value::List(vec![frame("io.rs", 10, "read", true), frame("main.rs", 3, "run", false)]),
        );

        let output = TraceFormatter::new().format(&event).into_text();

        assert!(output.contains("Trace:"));
        assert!(output.contains("File : io.rs"));
        assert!(output.contains("Line : 10"));
        assert!(output.contains("Func : read"));
        assert!(output.contains("Type : static"));
        assert!(output.contains("Type : instance"));
        assert!(output.contains("#0   arg0"));
    }

    #[test]
    fn test_missing_frame_fields_render_dash() {
        let event = Event::new(Severity::Error, "boom")
            .with_extra_field(TRACE_KEY, Value::List(vec![Value::Map(BTreeMap::new())]));

        let output = TraceFormatter::new().format(&event).into_text();
        assert!(output.contains("File : -"));
        assert!(output.contains("Args : -"));
    }
}
