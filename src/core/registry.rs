//! Typed plugin registries
//!
//! Each registry maps a short name to a factory building the appropriate
//! plugin from a JSON options object. Built-in names are registered by
//! `with_defaults`; legacy aliases live in a static lookup table consulted
//! before the factory map, so old configuration keeps resolving without
//! the aliases being part of the core contract.

use super::error::{LoggerError, Result};
use crate::filters::{
    Filter, MockFilter, PriorityFilter, RegexFilter, SampleFilter, SuppressFilter, TimestampFilter,
};
use crate::formatters::{
    BaseFormatter, ConsoleFormatter, DbFormatter, ErrorHandlerFormatter, Formatter,
    SimpleFormatter, TraceFormatter, XmlFormatter,
};
use crate::processors::{
    BacktraceProcessor, PlaceholderProcessor, Processor, ReferenceIdProcessor, RequestIdProcessor,
};
use crate::writers::{
    FilterSpec, FingersCrossedWriter, FormatterSpec, MockWriter, NullWriter, StreamWriter, Writer,
};
use serde_json::Value as Options;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Legacy short names accepted for backwards compatibility
const ALIASES: &[(&str, &str)] = &[
    ("priorityfilter", "priority"),
    ("regexfilter", "regex"),
    ("suppressfilter", "suppress"),
    ("validatorfilter", "validator"),
    ("simpleformatter", "simple"),
    ("xmlformatter", "xml"),
    ("errorhandlerformatter", "error_handler"),
    ("errorhandler", "error_handler"),
    ("exceptionhandler", "trace"),
    ("chromephp", "console"),
    ("firephp", "console"),
    ("psrplaceholder", "placeholder"),
    ("requestid", "request_id"),
    ("referenceid", "reference_id"),
    ("fingerscrossed", "fingers_crossed"),
];

fn resolve_alias(name: &str) -> &str {
    let lowered = name.to_lowercase();
    for (alias, canonical) in ALIASES {
        if *alias == lowered {
            return canonical;
        }
    }
    name
}

fn opt_str<'a>(options: &'a Options, key: &str) -> Option<&'a str> {
    options.get(key).and_then(Options::as_str)
}

fn opt_i64(options: &Options, key: &str) -> Option<i64> {
    options.get(key).and_then(Options::as_i64)
}

fn opt_f64(options: &Options, key: &str) -> Option<f64> {
    options.get(key).and_then(Options::as_f64)
}

fn opt_bool(options: &Options, key: &str) -> Option<bool> {
    options.get(key).and_then(Options::as_bool)
}

fn require<T>(value: Option<T>, component: &str, key: &str) -> Result<T> {
    value.ok_or_else(|| {
        LoggerError::invalid_argument(component, format!("missing required option '{}'", key))
    })
}

/// Apply the plugin keys every writer's options accept: `filters`, an
/// array of registry entries or bare priority thresholds, and `formatter`,
/// a registry name or `{name, options}` object.
fn apply_writer_plugins(writer: &mut dyn Writer, options: &Options) -> Result<()> {
    if let Some(filters) = options.get("filters") {
        let entries = filters.as_array().ok_or_else(|| {
            LoggerError::invalid_argument("WriterRegistry", "'filters' must be an array")
        })?;
        for entry in entries {
            let spec = match entry {
                Options::Number(threshold) => FilterSpec::Priority(require(
                    threshold.as_i64(),
                    "WriterRegistry",
                    "filters[] priority",
                )?),
                Options::Object(_) => {
                    let name = require(opt_str(entry, "name"), "WriterRegistry", "filters[].name")?;
                    let filter_options = entry.get("options").cloned().unwrap_or(Options::Null);
                    FilterSpec::by_name(name, filter_options)
                }
                _ => {
                    return Err(LoggerError::invalid_argument(
                        "WriterRegistry",
                        "each 'filters' entry must be an object or a priority number",
                    ))
                }
            };
            writer.add_filter(spec)?;
        }
    }

    match options.get("formatter") {
        None => {}
        Some(Options::String(name)) => {
            writer.set_formatter(FormatterSpec::by_name(name, Options::Null))?;
        }
        Some(entry @ Options::Object(_)) => {
            let name = require(opt_str(entry, "name"), "WriterRegistry", "formatter.name")?;
            let formatter_options = entry.get("options").cloned().unwrap_or(Options::Null);
            writer.set_formatter(FormatterSpec::by_name(name, formatter_options))?;
        }
        Some(_) => {
            return Err(LoggerError::invalid_argument(
                "WriterRegistry",
                "'formatter' must be a name or a {name, options} object",
            ))
        }
    }
    Ok(())
}

macro_rules! registry {
    ($name:ident, $trait_object:ty) => {
        pub struct $name {
            factories: HashMap<String, Box<dyn Fn(&Options) -> Result<$trait_object> + Send + Sync>>,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    factories: HashMap::new(),
                }
            }

            pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
            where
                F: Fn(&Options) -> Result<$trait_object> + Send + Sync + 'static,
            {
                self.factories.insert(name.into(), Box::new(factory));
            }

            /// Resolve a short name and options to a constructed instance
            pub fn resolve(&self, name: &str, options: &Options) -> Result<$trait_object> {
                let canonical = resolve_alias(name);
                let factory = self
                    .factories
                    .get(canonical)
                    .or_else(|| self.factories.get(&canonical.to_lowercase()))
                    .ok_or_else(|| {
                        LoggerError::invalid_argument(
                            stringify!($name),
                            format!("unknown plugin name '{}'", name),
                        )
                    })?;
                factory(options)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::with_defaults()
            }
        }
    };
}

registry!(FilterRegistry, Box<dyn Filter>);
registry!(FormatterRegistry, Box<dyn Formatter>);
registry!(ProcessorRegistry, Box<dyn Processor>);
registry!(WriterRegistry, Box<dyn Writer>);

impl FilterRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("priority", |options| {
            let priority = require(opt_i64(options, "priority"), "PriorityFilter", "priority")?;
            let filter = PriorityFilter::from_raw(priority, opt_str(options, "operator"))?;
            Ok(Box::new(filter) as Box<dyn Filter>)
        });
        registry.register("regex", |options| {
            let pattern = require(
                opt_str(options, "regex").or_else(|| opt_str(options, "pattern")),
                "RegexFilter",
                "regex",
            )?;
            Ok(Box::new(RegexFilter::new(pattern)?) as Box<dyn Filter>)
        });
        registry.register("sample", |options| {
            let rate = require(
                opt_f64(options, "sample_rate").or_else(|| opt_f64(options, "rate")),
                "SampleFilter",
                "sample_rate",
            )?;
            Ok(Box::new(SampleFilter::new(rate)?) as Box<dyn Filter>)
        });
        registry.register("suppress", |options| {
            let suppressed = opt_bool(options, "suppress").unwrap_or(false);
            Ok(Box::new(SuppressFilter::new(suppressed)) as Box<dyn Filter>)
        });
        registry.register("timestamp", |options| {
            let part = require(opt_str(options, "part"), "TimestampFilter", "part")?;
            let value = require(opt_i64(options, "value"), "TimestampFilter", "value")?;
            let filter = TimestampFilter::from_raw(part, value, opt_str(options, "operator"))?;
            Ok(Box::new(filter) as Box<dyn Filter>)
        });
        registry.register("mock", |_options| {
            Ok(Box::new(MockFilter::new()) as Box<dyn Filter>)
        });
        registry
    }
}

impl FormatterRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("simple", |options| {
            let formatter = match opt_str(options, "format") {
                Some(template) => SimpleFormatter::with_template(template),
                None => SimpleFormatter::new(),
            };
            Ok(Box::new(formatter) as Box<dyn Formatter>)
        });
        registry.register("base", |_options| {
            Ok(Box::new(BaseFormatter::new()) as Box<dyn Formatter>)
        });
        registry.register("error_handler", |options| {
            let formatter = match opt_str(options, "format") {
                Some(template) => ErrorHandlerFormatter::with_template(template),
                None => ErrorHandlerFormatter::new(),
            };
            Ok(Box::new(formatter) as Box<dyn Formatter>)
        });
        registry.register("trace", |_options| {
            Ok(Box::new(TraceFormatter::new()) as Box<dyn Formatter>)
        });
        registry.register("db", |_options| {
            Ok(Box::new(DbFormatter::new()) as Box<dyn Formatter>)
        });
        registry.register("xml", |options| {
            let mut formatter = XmlFormatter::new();
            if let Some(root) = opt_str(options, "root_element") {
                formatter = formatter.with_root_element(root);
            }
            if let Some(encoding) = opt_str(options, "encoding") {
                formatter = formatter.with_encoding(encoding);
            }
            Ok(Box::new(formatter) as Box<dyn Formatter>)
        });
        registry.register("console", |_options| {
            Ok(Box::new(ConsoleFormatter::new()) as Box<dyn Formatter>)
        });
        registry
    }
}

impl ProcessorRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("backtrace", |options| {
            let mut processor = BacktraceProcessor::new();
            if let Some(Options::Array(prefixes)) = options.get("ignored_prefixes") {
                for prefix in prefixes.iter().filter_map(Options::as_str) {
                    processor = processor.ignore_prefix(prefix);
                }
            }
            Ok(Box::new(processor) as Box<dyn Processor>)
        });
        registry.register("request_id", |_options| {
            Ok(Box::new(RequestIdProcessor::new()) as Box<dyn Processor>)
        });
        registry.register("reference_id", |options| {
            let processor = ReferenceIdProcessor::new();
            if let Some(id) = opt_str(options, "reference_id") {
                processor.set_reference_id(id);
            }
            Ok(Box::new(processor) as Box<dyn Processor>)
        });
        registry.register("placeholder", |_options| {
            Ok(Box::new(PlaceholderProcessor::new()) as Box<dyn Processor>)
        });
        registry
    }
}

impl WriterRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("stream", |options| {
            let path = require(
                opt_str(options, "stream").or_else(|| opt_str(options, "path")),
                "StreamWriter",
                "stream",
            )?;
            let mut writer = StreamWriter::open(path)?;
            if let Some(separator) = opt_str(options, "log_separator") {
                writer = writer.with_separator(separator);
            }
            apply_writer_plugins(&mut writer, options)?;
            Ok(Box::new(writer) as Box<dyn Writer>)
        });
        registry.register("null", |options| {
            let mut writer = NullWriter::new();
            apply_writer_plugins(&mut writer, options)?;
            Ok(Box::new(writer) as Box<dyn Writer>)
        });
        registry.register("mock", |options| {
            let mut writer = MockWriter::new();
            apply_writer_plugins(&mut writer, options)?;
            Ok(Box::new(writer) as Box<dyn Writer>)
        });
        registry.register("fingers_crossed", |options| {
            let inner = options.get("writer").ok_or_else(|| {
                LoggerError::invalid_argument(
                    "FingersCrossedWriter",
                    "missing required option 'writer'",
                )
            })?;
            let inner_name = require(
                opt_str(inner, "name"),
                "FingersCrossedWriter",
                "writer.name",
            )?;
            let inner_options = inner.get("options").cloned().unwrap_or(Options::Null);
            let delegate = default_writer_registry().resolve(inner_name, &inner_options)?;

            let mut writer = FingersCrossedWriter::new(delegate);
            if let Some(priority) = opt_i64(options, "action_priority") {
                writer = writer.with_action_priority(priority.try_into()?);
            }
            if let Some(size) = opt_i64(options, "buffer_size") {
                writer = writer.with_buffer_size(size as usize);
            }
            apply_writer_plugins(&mut writer, options)?;
            Ok(Box::new(writer) as Box<dyn Writer>)
        });
        for (name, extension) in [
            ("syslog", "SyslogSink"),
            ("db", "DbAdapter"),
            ("document", "DocumentStore"),
            ("mail", "MailTransport"),
            ("console", "ConsoleBridge"),
        ] {
            // These writers need a live capability object; configuration
            // alone cannot supply one. Applications register their own
            // factory over these names once the capability exists.
            registry.register(name, move |_options| {
                Err(LoggerError::missing_extension(name, extension))
            });
        }
        registry
    }
}

/// Shared default registries, built once per process
pub(crate) fn default_filter_registry() -> Arc<FilterRegistry> {
    static REGISTRY: OnceLock<Arc<FilterRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(FilterRegistry::with_defaults())))
}

pub(crate) fn default_formatter_registry() -> Arc<FormatterRegistry> {
    static REGISTRY: OnceLock<Arc<FormatterRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(FormatterRegistry::with_defaults())))
}

pub(crate) fn default_processor_registry() -> Arc<ProcessorRegistry> {
    static REGISTRY: OnceLock<Arc<ProcessorRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(ProcessorRegistry::with_defaults())))
}

pub(crate) fn default_writer_registry() -> Arc<WriterRegistry> {
    static REGISTRY: OnceLock<Arc<WriterRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(WriterRegistry::with_defaults())))
}
