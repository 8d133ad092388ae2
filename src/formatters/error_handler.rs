//! Error handler template formatter

use super::base::flatten_value;
use super::{Formatted, Formatter};
use crate::core::{Event, TimestampFormat, Value};

pub const DEFAULT_TEMPLATE: &str = "%timestamp% %priorityName% (%priority%) %message% \
(errno %extra[errno]%) in %extra[file]% on line %extra[line]%";

/// Template formatter with bracketed placeholders for nested extra data.
///
/// Every key reachable in `extra` is addressable as `%extra[key]%`,
/// `%extra[key][subkey]%` and so on, so arbitrarily nested diagnostic
/// data can be referenced directly in the template. Placeholders that do
/// not resolve are left verbatim in the output, which lets the caller
/// spot a template/data mismatch in the rendered line.
pub struct ErrorHandlerFormatter {
    template: String,
    timestamp_format: TimestampFormat,
}

impl ErrorHandlerFormatter {
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    fn collect_placeholders(
        &self,
        prefix: &str,
        value: &Value,
        out: &mut Vec<(String, String)>,
    ) {
        if let Value::Map(entries) = value {
            for (key, val) in entries {
                let path = format!("{}[{}]", prefix, key);
                self.collect_placeholders(&path, val, out);
            }
        }
        if let Some(rendered) = flatten_value(value, &self.timestamp_format, 0) {
            out.push((format!("%{}%", prefix), rendered));
        }
    }
}

impl Default for ErrorHandlerFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for ErrorHandlerFormatter {
    fn format(&self, event: &Event) -> Formatted {
        let mut output = self.template.clone();

        output = output.replace(
            "%timestamp%",
            &self.timestamp_format.format(&event.timestamp),
        );
        output = output.replace("%priorityName%", event.severity_name());
        output = output.replace("%priority%", &event.severity.value().to_string());
        output = output.replace("%message%", &event.message);

        let mut placeholders = Vec::new();
        self.collect_placeholders("extra", &Value::Map(event.extra.clone()), &mut placeholders);
        for (token, rendered) in placeholders {
            output = output.replace(&token, &rendered);
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
