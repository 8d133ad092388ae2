//! Core pipeline types
//!
//! The event structure, severity table, logger front-end, plugin
//! registries, and the shared plumbing the plugin directories build on.

pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod logger;
pub mod priority_list;
pub mod registry;
pub mod severity;
pub mod timestamp;
pub mod value;

pub use config::{build_with_handlers, LoggerConfig, PluginConfig};
pub use error::{LoggerError, Result};
pub use event::Event;
pub use handlers::{log_error_chain, register_panic_handler, PanicHandlerGuard};
pub use logger::{Logger, LoggerBuilder, MessageInput, DEFAULT_PLUGIN_PRIORITY};
pub use priority_list::PriorityList;
pub use registry::{FilterRegistry, FormatterRegistry, ProcessorRegistry, WriterRegistry};
pub use severity::Severity;
pub use timestamp::TimestampFormat;
pub use value::Value;
