//! XML fragment formatter

use super::base::flatten_value;
use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat};

/// Source field referenced by the element mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Timestamp,
    PriorityName,
    Priority,
    Message,
    Extra,
}

/// Renders an event as an XML fragment without a declaration.
///
/// The element mapping restricts and renames which top-level fields of
/// the event appear in the fragment; the default mapping emits every
/// field under its own name. An empty `extra` map produces no `extra`
/// element at all.
pub struct XmlFormatter {
    root_element: String,
    encoding: String,
    mapping: Vec<(EventField, String)>,
    timestamp_format: TimestampFormat,
}

fn default_mapping() -> Vec<(EventField, String)> {
    vec![
        (EventField::Timestamp, "timestamp".to_string()),
        (EventField::PriorityName, "priorityName".to_string()),
        (EventField::Priority, "priority".to_string()),
        (EventField::Message, "message".to_string()),
        (EventField::Extra, "extra".to_string()),
    ]
}

/// Escape text content. Ampersands are escaped unconditionally, so data
/// that already contains entities comes out double-escaped rather than
/// silently merged with our own escaping.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl XmlFormatter {
    pub fn new() -> Self {
        Self {
            root_element: "logEntry".to_string(),
            encoding: "UTF-8".to_string(),
            mapping: default_mapping(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_root_element(mut self, element: impl Into<String>) -> Self {
        self.root_element = element.into();
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Restrict and rename the emitted fields
    #[must_use]
    pub fn with_mapping(mut self, mapping: Vec<(EventField, String)>) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    fn render_field(&self, field: EventField, element: &str, event: &Event) -> Option<String> {
        let text = match field {
            EventField::Timestamp => self.timestamp_format.format(&event.timestamp),
            EventField::PriorityName => event.severity_name().to_string(),
            EventField::Priority => event.severity.value().to_string(),
            EventField::Message => event.message.clone(),
            EventField::Extra => {
                if event.extra.is_empty() {
                    return None;
                }
                let children: String = event
                    .extra
                    .iter()
                    .filter_map(|(key, val)| {
                        flatten_value(val, &self.timestamp_format, 0)
                            .map(|rendered| format!("<{}>{}</{}>", key, escape_xml(&rendered), key))
                    })
                    .collect();
                return Some(format!("<{}>{}</{}>", element, children, element));
            }
        };
        Some(format!("<{}>{}</{}>", element, escape_xml(&text), element))
    }
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for XmlFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let body: String = self
            .mapping
            .iter()
            .filter_map(|(field, element)| self.render_field(*field, element, event))
            .collect();

        Formatted::Text(format!(
            "<{root}>{body}</{root}>",
            root = self.root_element,
            body = body
        ))
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}
