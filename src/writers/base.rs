//! Shared writer machinery
//!
//! Every concrete writer embeds a `WriterBase` carrying the filter chain,
//! the formatter, the name-resolution registries, and the error
//! conversion toggle. Composition instead of inheritance: writers call
//! into the base, the base never calls the writer.

use super::{FilterSpec, FormatterSpec};
use crate::core::registry::{
    default_filter_registry, default_formatter_registry, FilterRegistry, FormatterRegistry,
};
use crate::core::{Event, LoggerError, Result, Severity};
use crate::filters::{Filter, PriorityFilter};
use crate::formatters::{Formatted, Formatter, SimpleFormatter};
use std::sync::Arc;

pub struct WriterBase {
    filters: Vec<Box<dyn Filter>>,
    formatter: Box<dyn Formatter>,
    convert_errors: bool,
    filter_registry: Arc<FilterRegistry>,
    formatter_registry: Arc<FormatterRegistry>,
}

impl WriterBase {
    pub fn new() -> Self {
        Self::with_formatter(Box::new(SimpleFormatter::new()))
    }

    pub fn with_formatter(formatter: Box<dyn Formatter>) -> Self {
        Self {
            filters: Vec::new(),
            formatter,
            convert_errors: true,
            filter_registry: default_filter_registry(),
            formatter_registry: default_formatter_registry(),
        }
    }

    /// Swap in a caller-provided filter registry
    pub fn set_filter_registry(&mut self, registry: Arc<FilterRegistry>) {
        self.filter_registry = registry;
    }

    /// Swap in a caller-provided formatter registry
    pub fn set_formatter_registry(&mut self, registry: Arc<FormatterRegistry>) {
        self.formatter_registry = registry;
    }

    /// Toggle conversion of sink delivery errors into "Unable to write"
    pub fn set_convert_errors(&mut self, convert: bool) {
        self.convert_errors = convert;
    }

    pub fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        let filter = match spec {
            FilterSpec::Instance(filter) => filter,
            FilterSpec::Name { name, options } => {
                self.filter_registry.resolve(&name, &options)?
            }
            FilterSpec::Priority(threshold) => {
                Box::new(PriorityFilter::new(Severity::try_from(threshold)?))
            }
        };
        self.filters.push(filter);
        Ok(())
    }

    pub fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()> {
        self.formatter = match spec {
            FormatterSpec::Instance(formatter) => formatter,
            FormatterSpec::Name { name, options } => {
                self.formatter_registry.resolve(&name, &options)?
            }
        };
        Ok(())
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn formatter_mut(&mut self) -> &mut Box<dyn Formatter> {
        &mut self.formatter
    }

    /// Filters run in insertion order; the first rejection wins
    pub fn accepts(&self, event: &Event) -> bool {
        self.filters.iter().all(|filter| filter.accept(event))
    }

    pub fn render(&self, event: &Event) -> Formatted {
        self.formatter.format(event)
    }

    /// Wrap a sink delivery result according to the conversion toggle.
    ///
    /// With conversion on (the default), any delivery failure surfaces as
    /// a `Runtime` "Unable to write" error chaining the low-level cause.
    pub fn guard<T, E>(&self, result: std::result::Result<T, E>) -> Result<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        result.map_err(|err| {
            if self.convert_errors {
                LoggerError::runtime_with_source("Unable to write", err)
            } else {
                LoggerError::runtime(err.to_string())
            }
        })
    }
}

impl Default for WriterBase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SuppressFilter;
    use serde_json::json;

    #[test]
    fn test_filter_chain_short_circuits() {
        let mut base = WriterBase::new();
        base.add_filter(FilterSpec::from(SuppressFilter::new(true)))
            .unwrap();

        assert!(!base.accepts(&Event::new(Severity::Emergency, "m")));
    }

    #[test]
    fn test_bare_integer_is_priority_sugar() {
        let mut base = WriterBase::new();
        base.add_filter(FilterSpec::from(4)).unwrap();

        assert!(base.accepts(&Event::new(Severity::Error, "m")));
        assert!(!base.accepts(&Event::new(Severity::Info, "m")));
    }

    #[test]
    fn test_bad_priority_sugar_rejected() {
        let mut base = WriterBase::new();
        let err = base.add_filter(FilterSpec::from(42)).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidArgument { .. }));
    }

    #[test]
    fn test_name_resolution() {
        let mut base = WriterBase::new();
        base.add_filter(FilterSpec::by_name("regex", json!({"regex": "^keep"})))
            .unwrap();
        base.set_formatter(FormatterSpec::by_name("simple", json!({"format": "%message%"})))
            .unwrap();

        let event = Event::new(Severity::Info, "keep this");
        assert!(base.accepts(&event));
        assert_eq!(base.render(&event).into_text(), "keep this");

        assert!(!base.accepts(&Event::new(Severity::Info, "drop this")));
    }

    #[test]
    fn test_unresolvable_name_is_invalid_argument() {
        let mut base = WriterBase::new();
        let err = base
            .add_filter(FilterSpec::by_name("nope", serde_json::Value::Null))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidArgument { .. }));
    }

    #[test]
    fn test_guard_converts_delivery_errors() {
        let base = WriterBase::new();
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");

        let err = base.guard::<(), _>(Err(io_err)).unwrap_err();
        assert!(err.to_string().contains("Unable to write"));
        let source = std::error::Error::source(&err).expect("cause chained");
        assert!(source.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_guard_passthrough_when_disabled() {
        let mut base = WriterBase::new();
        base.set_convert_errors(false);
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");

        let err = base.guard::<(), _>(Err(io_err)).unwrap_err();
        assert!(!err.to_string().contains("Unable to write"));
        assert!(err.to_string().contains("pipe closed"));
    }
}
