//! The logger front-end
//!
//! A `Logger` owns a priority-ordered collection of writers and another of
//! processors. Each log call validates the priority, builds one event,
//! runs it through every processor (highest priority first), then offers
//! it to every writer in the same order. Everything happens synchronously
//! on the calling thread; when the call returns, delivery has either
//! completed or failed.

use super::error::{LoggerError, Result};
use super::event::Event;
use super::priority_list::PriorityList;
use super::registry::{
    default_processor_registry, default_writer_registry, ProcessorRegistry, WriterRegistry,
};
use super::severity::Severity;
use super::value::Value;
use crate::processors::Processor;
use crate::writers::Writer;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default priority for writers and processors added without one
pub const DEFAULT_PLUGIN_PRIORITY: i32 = 1;

/// A log message: either one string or parts concatenated in order
pub enum MessageInput {
    Text(String),
    Parts(Vec<String>),
}

impl MessageInput {
    fn into_message(self) -> String {
        match self {
            MessageInput::Text(text) => text,
            MessageInput::Parts(parts) => parts.concat(),
        }
    }
}

impl From<&str> for MessageInput {
    fn from(text: &str) -> Self {
        MessageInput::Text(text.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(text: String) -> Self {
        MessageInput::Text(text)
    }
}

impl From<Vec<String>> for MessageInput {
    fn from(parts: Vec<String>) -> Self {
        MessageInput::Parts(parts)
    }
}

impl From<Vec<&str>> for MessageInput {
    fn from(parts: Vec<&str>) -> Self {
        MessageInput::Parts(parts.iter().map(|part| part.to_string()).collect())
    }
}

macro_rules! severity_methods {
    ($(($method:ident, $with_extra:ident, $severity:expr)),* $(,)?) => {
        $(
            pub fn $method(&mut self, message: impl Into<MessageInput>) -> Result<&mut Self> {
                self.log($severity.value(), message, BTreeMap::new())
            }

            pub fn $with_extra(
                &mut self,
                message: impl Into<MessageInput>,
                extra: BTreeMap<String, Value>,
            ) -> Result<&mut Self> {
                self.log($severity.value(), message, extra)
            }
        )*
    };
}

pub struct Logger {
    writers: PriorityList<Box<dyn Writer>>,
    processors: PriorityList<Box<dyn Processor>>,
    writer_registry: Arc<WriterRegistry>,
    processor_registry: Arc<ProcessorRegistry>,
    shut_down: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            writers: PriorityList::new(),
            processors: PriorityList::new(),
            writer_registry: default_writer_registry(),
            processor_registry: default_processor_registry(),
            shut_down: false,
        }
    }

    /// Convenience for the common one-writer setup
    pub fn with_writer(writer: impl Writer + 'static) -> Self {
        let mut logger = Self::new();
        logger.add_writer(writer);
        logger
    }

    pub fn set_writer_registry(&mut self, registry: Arc<WriterRegistry>) {
        self.writer_registry = registry;
    }

    pub fn set_processor_registry(&mut self, registry: Arc<ProcessorRegistry>) {
        self.processor_registry = registry;
    }

    pub fn add_writer(&mut self, writer: impl Writer + 'static) -> &mut Self {
        self.add_boxed_writer(Box::new(writer), DEFAULT_PLUGIN_PRIORITY)
    }

    pub fn add_writer_with_priority(
        &mut self,
        writer: impl Writer + 'static,
        priority: i32,
    ) -> &mut Self {
        self.add_boxed_writer(Box::new(writer), priority)
    }

    pub fn add_boxed_writer(&mut self, writer: Box<dyn Writer>, priority: i32) -> &mut Self {
        self.writers.insert(writer, priority);
        self
    }

    /// Resolve a writer by registry name and add it
    pub fn add_writer_by_name(
        &mut self,
        name: &str,
        options: &serde_json::Value,
        priority: i32,
    ) -> Result<&mut Self> {
        let writer = self.writer_registry.resolve(name, options)?;
        Ok(self.add_boxed_writer(writer, priority))
    }

    pub fn add_processor(&mut self, processor: impl Processor + 'static) -> &mut Self {
        self.add_boxed_processor(Box::new(processor), DEFAULT_PLUGIN_PRIORITY)
    }

    pub fn add_processor_with_priority(
        &mut self,
        processor: impl Processor + 'static,
        priority: i32,
    ) -> &mut Self {
        self.add_boxed_processor(Box::new(processor), priority)
    }

    pub fn add_boxed_processor(
        &mut self,
        processor: Box<dyn Processor>,
        priority: i32,
    ) -> &mut Self {
        self.processors.insert(processor, priority);
        self
    }

    /// Resolve a processor by registry name and add it
    pub fn add_processor_by_name(
        &mut self,
        name: &str,
        options: &serde_json::Value,
        priority: i32,
    ) -> Result<&mut Self> {
        let processor = self.processor_registry.resolve(name, options)?;
        Ok(self.add_boxed_processor(processor, priority))
    }

    pub fn writer_count(&self) -> usize {
        self.writers.len()
    }

    /// Log a message at the given numeric priority.
    ///
    /// The priority must be within the severity table, at least one writer
    /// must be attached, and the first writer failure aborts the call. On
    /// success the logger itself is returned so calls can be chained.
    pub fn log(
        &mut self,
        priority: i64,
        message: impl Into<MessageInput>,
        extra: BTreeMap<String, Value>,
    ) -> Result<&mut Self> {
        let severity = Severity::try_from(priority)?;
        if self.writers.is_empty() {
            return Err(LoggerError::runtime("no writer specified"));
        }

        let mut event =
            Event::new(severity, message.into().into_message()).with_extra(extra);
        for processor in self.processors.iter() {
            event = processor.process(event);
        }
        for writer in self.writers.iter_mut() {
            writer.write(&event)?;
        }
        Ok(self)
    }

    severity_methods!(
        (emerg, emerg_with_extra, Severity::Emergency),
        (alert, alert_with_extra, Severity::Alert),
        (crit, crit_with_extra, Severity::Critical),
        (err, err_with_extra, Severity::Error),
        (warn, warn_with_extra, Severity::Warning),
        (notice, notice_with_extra, Severity::Notice),
        (info, info_with_extra, Severity::Info),
        (debug, debug_with_extra, Severity::Debug),
    );

    /// Shut down every writer, highest priority first.
    ///
    /// All writers are attempted even if one fails; the first error is
    /// reported. Idempotent.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;

        let mut first_error = None;
        for writer in self.writers.iter_mut() {
            if let Err(err) = writer.shutdown() {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("writers", &self.writers.len())
            .field("processors", &self.processors.len())
            .field("shut_down", &self.shut_down)
            .finish()
    }
}

/// Fluent construction for the common setup paths
pub struct LoggerBuilder {
    logger: Logger,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            logger: Logger::new(),
        }
    }

    #[must_use]
    pub fn writer(mut self, writer: impl Writer + 'static) -> Self {
        self.logger.add_writer(writer);
        self
    }

    #[must_use]
    pub fn writer_with_priority(mut self, writer: impl Writer + 'static, priority: i32) -> Self {
        self.logger.add_writer_with_priority(writer, priority);
        self
    }

    #[must_use]
    pub fn processor(mut self, processor: impl Processor + 'static) -> Self {
        self.logger.add_processor(processor);
        self
    }

    #[must_use]
    pub fn processor_with_priority(
        mut self,
        processor: impl Processor + 'static,
        priority: i32,
    ) -> Self {
        self.logger.add_processor_with_priority(processor, priority);
        self
    }

    pub fn build(self) -> Logger {
        self.logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
