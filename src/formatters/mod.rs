//! Formatter implementations
//!
//! A formatter is a pure transform from an event to a rendered result:
//! a text line for stream-style sinks, a structured record for row-insert
//! sinks, or a labeled payload for console bridges.

pub mod base;
pub mod console;
pub mod db;
pub mod error_handler;
pub mod simple;
pub mod trace;
pub mod xml;

pub use base::BaseFormatter;
pub use console::ConsoleFormatter;
pub use db::DbFormatter;
pub use error_handler::ErrorHandlerFormatter;
pub use simple::SimpleFormatter;
pub use trace::TraceFormatter;
pub use xml::XmlFormatter;

use crate::core::{Event, TimestampFormat};

/// Rendered output of a formatter
#[derive(Debug, Clone)]
pub enum Formatted {
    /// A rendered line for text sinks
    Text(String),
    /// The event itself with embedded timestamps rendered, for row sinks
    Record(Event),
    /// A payload/label pair for browser-console style bridges
    Labeled {
        payload: serde_json::Value,
        label: Option<String>,
    },
}

impl Formatted {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Formatted::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Reduce any variant to a text line. Structured variants fall back
    /// to their JSON rendering.
    pub fn into_text(self) -> String {
        match self {
            Formatted::Text(s) => s,
            Formatted::Record(event) => serde_json::to_string(&event).unwrap_or_default(),
            Formatted::Labeled { payload, .. } => payload.to_string(),
        }
    }
}

pub trait Formatter: Send + Sync {
    fn format(&self, event: &Event) -> Formatted;

    /// Set the date-rendering format observed whenever the formatter
    /// renders a timestamp embedded anywhere in the event
    fn set_timestamp_format(&mut self, format: TimestampFormat);

    fn timestamp_format(&self) -> &TimestampFormat;
}
