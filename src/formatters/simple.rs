//! Simple template formatter

use super::base::flatten_extra;
use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat};

pub const DEFAULT_TEMPLATE: &str = "%timestamp% %priorityName% (%priority%): %message% %extra%";

/// Renders an event through a `%fieldName%` template.
///
/// When `extra` is empty the literal `%extra%` token is collapsed and
/// trailing whitespace trimmed, so the default template never leaves an
/// empty-token artifact at the end of the line.
pub struct SimpleFormatter {
    template: String,
    timestamp_format: TimestampFormat,
}

impl SimpleFormatter {
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for SimpleFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let mut output = self.template.clone();

        output = output.replace(
            "%timestamp%",
            &self.timestamp_format.format(&event.timestamp),
        );
        output = output.replace("%priorityName%", event.severity_name());
        output = output.replace("%priority%", &event.severity.value().to_string());
        output = output.replace("%message%", &event.message);

        if event.extra.is_empty() {
            output = output.replace("%extra%", "");
            output.truncate(output.trim_end().len());
        } else {
            output = output.replace(
                "%extra%",
                &flatten_extra(&event.extra, &self.timestamp_format),
            );
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
    use chrono::TimeZone;

    fn fixed_event(severity: Severity, message: &str) -> Event {
        let mut event = Event::new(severity, message);
        event.timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .unwrap();
        event
    }

    #[test]
    fn test_default_template_without_extra() {
        let formatter = SimpleFormatter::new();
        let event = fixed_event(Severity::Alert, "m");

        let output = formatter.format(&event).into_text();
        assert_eq!(output, "2025-01-08T10:30:45.000Z ALERT (1): m");
    }

    #[test]
    fn test_default_template_with_extra() {
        let formatter = SimpleFormatter::new();
        let event = fixed_event(Severity::Info, "hello").with_extra_field("user", "alice");

        let output = formatter.format(&event).into_text();
        assert_eq!(output, "2025-01-08T10:30:45.000Z INFO (6): hello {user: alice}");
    }

    #[test]
    fn test_custom_template() {
        let formatter = SimpleFormatter::with_template("%priorityName%: %message%");
        let event = fixed_event(Severity::Error, "boom");

        assert_eq!(formatter.format(&event).into_text(), "ERR: boom");
    }

    #[test]
    fn test_timestamp_format_is_observed() {
        let mut formatter = SimpleFormatter::with_template("%timestamp%");
        formatter.set_timestamp_format(TimestampFormat::Unix);

        let event = fixed_event(Severity::Info, "m");
        let output = formatter.format(&event).into_text();
        assert_eq!(output, event.timestamp.timestamp().to_string());
    }
}
