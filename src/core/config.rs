//! Declarative logger construction
//!
//! Callers hand over an already-deserialized `LoggerConfig` (or the JSON
//! it came from); reading and parsing configuration files is their
//! business. Every plugin is resolved through the registries, so custom
//! registries extend what a config can name.

use super::error::Result;
use super::handlers::{register_panic_handler, PanicHandlerGuard};
use super::logger::{Logger, DEFAULT_PLUGIN_PRIORITY};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One plugin reference: registry name, insertion priority, options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub options: serde_json::Value,
}

fn default_priority() -> i32 {
    DEFAULT_PLUGIN_PRIORITY
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub writers: Vec<PluginConfig>,
    #[serde(default)]
    pub processors: Vec<PluginConfig>,
    /// Register the process panic handler on construction
    #[serde(default)]
    pub error_handler: bool,
}

impl Logger {
    /// Build a logger from a declarative config, resolving every plugin
    /// through the registries. The `error_handler` flag is not honored
    /// here because the hook needs a shared handle; use
    /// [`build_with_handlers`] for that.
    pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
        let mut logger = Logger::new();
        for writer in &config.writers {
            logger.add_writer_by_name(&writer.name, &writer.options, writer.priority)?;
        }
        for processor in &config.processors {
            logger.add_processor_by_name(
                &processor.name,
                &processor.options,
                processor.priority,
            )?;
        }
        Ok(logger)
    }
}

/// Build a shared logger from a config, registering the panic handler
/// when the config asks for it. The guard is `None` when the config does
/// not request a handler or when one is already registered.
pub fn build_with_handlers(
    config: &LoggerConfig,
) -> Result<(Arc<Mutex<Logger>>, Option<PanicHandlerGuard>)> {
    let logger = Arc::new(Mutex::new(Logger::from_config(config)?));
    let guard = if config.error_handler {
        register_panic_handler(Arc::clone(&logger))
    } else {
        None
    };
    Ok((logger, guard))
}
