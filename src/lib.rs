//! # Log Pipeline
//!
//! A pluggable, synchronous structured logging pipeline: events flow
//! through priority-ordered processors, then to priority-ordered writers,
//! each with its own filter chain and formatter.
//!
//! ## Features
//!
//! - **Syslog Severity Scale**: Eight levels, 0 (emergency) through 7 (debug)
//! - **Pluggable Everything**: Writers, filters, formatters, and processors
//!   resolve by name through extensible registries
//! - **Synchronous Delivery**: When a log call returns, delivery has
//!   completed or failed on the calling thread
//! - **Heterogeneous Sinks**: Streams, syslog, rows, documents, mail
//!   batches, and browser-console bridges behind one writer trait
//!
//! ```
//! use log_pipeline::prelude::*;
//!
//! let writer = MockWriter::new();
//! let mut logger = Logger::with_writer(writer.clone());
//! logger.info("pipeline up").unwrap();
//! assert_eq!(writer.event_count(), 1);
//! ```

pub mod core;
pub mod filters;
pub mod formatters;
pub mod processors;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        build_with_handlers, log_error_chain, register_panic_handler, Event, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, MessageInput, PanicHandlerGuard, PluginConfig, PriorityList,
        Result, Severity, TimestampFormat, Value,
    };
    pub use crate::filters::{
        Filter, Operator, PriorityFilter, RegexFilter, SampleFilter, SuppressFilter,
        TimestampFilter, ValidatorFilter,
    };
    pub use crate::formatters::{
        BaseFormatter, ConsoleFormatter, DbFormatter, ErrorHandlerFormatter, Formatted, Formatter,
        SimpleFormatter, TraceFormatter, XmlFormatter,
    };
    pub use crate::processors::{
        BacktraceProcessor, PlaceholderProcessor, Processor, ReferenceIdProcessor,
        RequestIdProcessor,
    };
    pub use crate::writers::{
        ConsoleBridge, ConsoleBridgeWriter, DbAdapter, DbWriter, DocumentStore, DocumentWriter,
        FilterSpec, FingersCrossedWriter, FormatterSpec, MailTransport, MailWriter, MockWriter,
        NullWriter, StreamWriter, SyslogSink, SyslogWriter, Writer, WriterMode,
    };
}

pub use crate::core::{
    Event, Logger, LoggerConfig, LoggerError, PluginConfig, Result, Severity, TimestampFormat,
    Value,
};
pub use crate::filters::Filter;
pub use crate::formatters::{Formatted, Formatter};
pub use crate::processors::Processor;
pub use crate::writers::{FilterSpec, FormatterSpec, Writer};
