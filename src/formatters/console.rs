//! Console bridge passthrough formatter

use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat, Value};

/// Passthrough formatter for browser-console style bridges.
///
/// Produces a payload/label pair instead of a text line: the payload is
/// the event's extra data as JSON and the label is the message. The date
/// format is not configurable; the setter is a no-op because the bridge
/// renders timestamps itself.
pub struct ConsoleFormatter {
    timestamp_format: TimestampFormat,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for ConsoleFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let payload = if event.extra.is_empty() {
            serde_json::Value::Null
        } else {
            Value::Map(event.extra.clone()).to_json_value()
        };
        Formatted::Labeled {
            payload,
            label: Some(event.message.clone()),
        }
    }

    fn set_timestamp_format(&mut self, _format: TimestampFormat) {
        // The bridge owns timestamp rendering; nothing to configure here.
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_labeled_payload() {
        let event = Event::new(Severity::Info, "clicked").with_extra_field("button", "save");
        let Formatted::Labeled { payload, label } = ConsoleFormatter::new().format(&event) else {
            panic!("expected labeled output");
        };

        assert_eq!(label.as_deref(), Some("clicked"));
        assert_eq!(payload["button"], "save");
    }

    #[test]
    fn test_empty_extra_yields_null_payload() {
        let event = Event::new(Severity::Info, "m");
        let Formatted::Labeled { payload, .. } = ConsoleFormatter::new().format(&event) else {
            panic!("expected labeled output");
        };
        assert!(payload.is_null());
    }

    #[test]
    fn test_date_format_setter_is_noop() {
        let mut formatter = ConsoleFormatter::new();
        formatter.set_timestamp_format(TimestampFormat::Unix);
        assert_eq!(*formatter.timestamp_format(), TimestampFormat::Iso8601);
    }
}
