//! Browser-console bridge writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, Result, Severity};
use crate::formatters::{ConsoleFormatter, Formatted};

/// Opaque emit capability of a developer-console bridge.
///
/// The bridge maps severity onto its own log/info/warn/error groups.
pub trait ConsoleBridge: Send + Sync {
    fn emit(
        &mut self,
        severity: Severity,
        label: Option<&str>,
        payload: &serde_json::Value,
    ) -> std::io::Result<()>;
}

/// Forwards events to a `ConsoleBridge` as payload/label pairs.
///
/// The default formatter is the console passthrough; a text formatter
/// still works, its line becoming the label with a null payload.
pub struct ConsoleBridgeWriter {
    base: WriterBase,
    bridge: Box<dyn ConsoleBridge>,
}

impl ConsoleBridgeWriter {
    pub fn new(bridge: Box<dyn ConsoleBridge>) -> Self {
        Self {
            base: WriterBase::with_formatter(Box::new(ConsoleFormatter::new())),
            bridge,
        }
    }
}

impl Writer for ConsoleBridgeWriter {
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.base.add_filter(spec)
    }

    fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()> {
        self.base.set_formatter(spec)
    }

    fn write(&mut self, event: &Event) -> Result<()> {
        if !self.base.accepts(event) {
            return Ok(());
        }

        let (payload, label) = match self.base.render(event) {
            Formatted::Labeled { payload, label } => (payload, label),
            Formatted::Record(record) => (
                serde_json::to_value(&record).unwrap_or(serde_json::Value::Null),
                None,
            ),
            Formatted::Text(line) => (serde_json::Value::Null, Some(line)),
        };

        let result = self.bridge.emit(event.severity, label.as_deref(), &payload);
        self.base.guard(result)
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::SimpleFormatter;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Emitted {
        calls: Vec<(Severity, Option<String>, serde_json::Value)>,
    }

    #[derive(Clone, Default)]
    struct FakeBridge(Arc<Mutex<Emitted>>);

    impl ConsoleBridge for FakeBridge {
        fn emit(
            &mut self,
            severity: Severity,
            label: Option<&str>,
            payload: &serde_json::Value,
        ) -> std::io::Result<()> {
            self.0
                .lock()
                .calls
                .push((severity, label.map(str::to_string), payload.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_emits_payload_and_label() {
        let bridge = FakeBridge::default();
        let emitted = bridge.clone();
        let mut writer = ConsoleBridgeWriter::new(Box::new(bridge));

        writer
            .write(&Event::new(Severity::Warning, "cache miss").with_extra_field("key", "user:7"))
            .unwrap();

        let emitted = emitted.0.lock();
        let (severity, label, payload) = &emitted.calls[0];
        assert_eq!(*severity, Severity::Warning);
        assert_eq!(label.as_deref(), Some("cache miss"));
        assert_eq!(payload["key"], "user:7");
    }

    #[test]
    fn test_text_formatter_becomes_label() {
        let bridge = FakeBridge::default();
        let emitted = bridge.clone();
        let mut writer = ConsoleBridgeWriter::new(Box::new(bridge));
        writer
            .set_formatter(FormatterSpec::from(SimpleFormatter::with_template("%message%")))
            .unwrap();

        writer.write(&Event::new(Severity::Info, "plain line")).unwrap();

        let emitted = emitted.0.lock();
        let (_, label, payload) = &emitted.calls[0];
        assert_eq!(label.as_deref(), Some("plain line"));
        assert!(payload.is_null());
    }

    #[test]
    fn test_failed_emit_is_runtime_error() {
        struct FailingBridge;
        impl ConsoleBridge for FailingBridge {
            fn emit(
                &mut self,
                _: Severity,
                _: Option<&str>,
                _: &serde_json::Value,
            ) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "bridge closed"))
            }
        }

        let mut writer = ConsoleBridgeWriter::new(Box::new(FailingBridge));
        let err = writer.write(&Event::new(Severity::Error, "m")).unwrap_err();
        assert!(err.to_string().contains("Unable to write"));
    }
}
