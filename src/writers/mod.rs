//! Writer implementations
//!
//! A writer owns an ordered filter chain and exactly one formatter, and
//! delivers accepted, formatted events to its sink. Each writer owns its
//! sink resource exclusively; delivery either completes or raises within
//! the same call stack.

pub mod base;
pub mod console;
pub mod db;
pub mod document;
pub mod fingers_crossed;
pub mod mail;
pub mod mock;
pub mod null;
pub mod stream;
pub mod syslog;

pub use base::WriterBase;
pub use console::{ConsoleBridge, ConsoleBridgeWriter};
pub use db::{DbAdapter, DbWriter};
pub use document::{DocumentStore, DocumentWriter};
pub use fingers_crossed::FingersCrossedWriter;
pub use mail::{MailTransport, MailWriter};
pub use mock::MockWriter;
pub use null::NullWriter;
pub use stream::{StreamWriter, WriterMode};
pub use syslog::{SyslogSink, SyslogWriter};

use crate::core::{Event, Result};
use crate::filters::Filter;
use crate::formatters::Formatter;

pub trait Writer: Send + Sync {
    /// Append a filter to this writer's private chain
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()>;

    /// Replace this writer's single formatter
    fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()>;

    /// Run filters in insertion order, short-circuiting on the first
    /// rejection; on acceptance format and deliver to the sink
    fn write(&mut self, event: &Event) -> Result<()>;

    /// Release any held resource. Idempotent; default no-op.
    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// A filter, a registry name with options, or a bare priority threshold
pub enum FilterSpec {
    Instance(Box<dyn Filter>),
    Name {
        name: String,
        options: serde_json::Value,
    },
    /// Sugar for a priority filter at the given threshold
    Priority(i64),
}

impl FilterSpec {
    pub fn by_name(name: impl Into<String>, options: serde_json::Value) -> Self {
        FilterSpec::Name {
            name: name.into(),
            options,
        }
    }
}

impl<F: Filter + 'static> From<F> for FilterSpec {
    fn from(filter: F) -> Self {
        FilterSpec::Instance(Box::new(filter))
    }
}

impl From<Box<dyn Filter>> for FilterSpec {
    fn from(filter: Box<dyn Filter>) -> Self {
        FilterSpec::Instance(filter)
    }
}

impl From<i64> for FilterSpec {
    fn from(threshold: i64) -> Self {
        FilterSpec::Priority(threshold)
    }
}

/// A formatter or a registry name with options
pub enum FormatterSpec {
    Instance(Box<dyn Formatter>),
    Name {
        name: String,
        options: serde_json::Value,
    },
}

impl FormatterSpec {
    pub fn by_name(name: impl Into<String>, options: serde_json::Value) -> Self {
        FormatterSpec::Name {
            name: name.into(),
            options,
        }
    }
}

impl<F: Formatter + 'static> From<F> for FormatterSpec {
    fn from(formatter: F) -> Self {
        FormatterSpec::Instance(Box::new(formatter))
    }
}

impl From<Box<dyn Formatter>> for FormatterSpec {
    fn from(formatter: Box<dyn Formatter>) -> Self {
        FormatterSpec::Instance(formatter)
    }
}
