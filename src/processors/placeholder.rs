//! Message placeholder substitution processor

use super::Processor;
use crate::core::{Event, Value};
use chrono::SecondsFormat;

/// Substitutes `{key}` placeholders in the message with stringified
/// values from `extra`.
///
/// Stringification: null becomes the empty string, booleans become
/// `"1"`/`""`, scalars use their display form, timestamps render as
/// ISO 8601, and structured values degrade to a type tag. Messages
/// without a `{` are passed through untouched.
#[derive(Default)]
pub struct PlaceholderProcessor;

impl PlaceholderProcessor {
    pub fn new() -> Self {
        Self
    }

    fn stringify(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            Value::List(_) => "[list]".to_string(),
            Value::Map(_) => "[map]".to_string(),
        }
    }
}

impl Processor for PlaceholderProcessor {
    fn process(&self, mut event: Event) -> Event {
        if !event.message.contains('{') {
            return event;
        }

        let mut message = event.message.clone();
        for (key, value) in &event.extra {
            let token = format!("{{{}}}", key);
            if message.contains(&token) {
                message = message.replace(&token, &Self::stringify(value));
            }
        }
        event.message = message;
        event
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}
