//! Syslog writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, Result, Severity};
use crate::formatters::SimpleFormatter;

/// Opaque syslog-call capability.
///
/// Severity maps straight through: both sides use the same 0..=7 scale.
pub trait SyslogSink: Send + Sync {
    fn open(&mut self, ident: &str, facility: i32) -> std::io::Result<()>;
    fn send(&mut self, severity: Severity, message: &str) -> std::io::Result<()>;
    fn close(&mut self);
}

const DEFAULT_FACILITY: i32 = 1; // user-level messages

/// Delivers formatted messages through a syslog capability.
///
/// The connection is opened lazily on first write and closed by
/// `shutdown`; a write after shutdown simply reopens. The default
/// formatter renders only the message, since syslog supplies its own
/// timestamp and severity metadata.
pub struct SyslogWriter {
    base: WriterBase,
    sink: Box<dyn SyslogSink>,
    application: String,
    facility: i32,
    open: bool,
}

impl SyslogWriter {
    pub fn new(sink: Box<dyn SyslogSink>, application: impl Into<String>) -> Self {
        Self {
            base: WriterBase::with_formatter(Box::new(SimpleFormatter::with_template(
                "%message%",
            ))),
            sink,
            application: application.into(),
            facility: DEFAULT_FACILITY,
            open: false,
        }
    }

    #[must_use]
    pub fn with_facility(mut self, facility: i32) -> Self {
        self.facility = facility;
        self
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    fn ensure_open(&mut self) -> Result<()> {
        if !self.open {
            let result = self.sink.open(&self.application, self.facility);
            self.base.guard(result)?;
            self.open = true;
        }
        Ok(())
    }
}

impl Writer for SyslogWriter {
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

        self.ensure_open()?;
        let message = self.base.render(event).into_text();
        let result = self.sink.send(event.severity, &message);
        self.base.guard(result)
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.open {
            self.sink.close();
            self.open = false;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Calls {
        opens: Vec<(String, i32)>,
        sent: Vec<(Severity, String)>,
        closes: usize,
    }

    #[derive(Clone, Default)]
    struct FakeSyslog(Arc<Mutex<Calls>>);

    impl SyslogSink for FakeSyslog {
        fn open(&mut self, ident: &str, facility: i32) -> std::io::Result<()> {
            self.0.lock().opens.push((ident.to_string(), facility));
            Ok(())
        }

        fn send(&mut self, severity: Severity, message: &str) -> std::io::Result<()> {
            self.0.lock().sent.push((severity, message.to_string()));
            Ok(())
        }

        fn close(&mut self) {
            self.0.lock().closes += 1;
        }
    }

    #[test]
    fn test_lazy_open_and_send() {
        let sink = FakeSyslog::default();
        let calls = sink.clone();
        let mut writer = SyslogWriter::new(Box::new(sink), "myapp");

        assert!(calls.0.lock().opens.is_empty());

        writer.write(&Event::new(Severity::Error, "disk failing")).unwrap();
        writer.write(&Event::new(Severity::Info, "recovered")).unwrap();

        let calls = calls.0.lock();
        assert_eq!(calls.opens, vec![("myapp".to_string(), DEFAULT_FACILITY)]);
        assert_eq!(calls.sent.len(), 2);
        assert_eq!(calls.sent[0].0, Severity::Error);
        assert_eq!(calls.sent[0].1, "disk failing");
    }

    #[test]
    fn test_shutdown_closes_and_write_reopens() {
        let sink = FakeSyslog::default();
        let calls = sink.clone();
        let mut writer = SyslogWriter::new(Box::new(sink), "myapp").with_facility(16);

        writer.write(&Event::new(Severity::Info, "a")).unwrap();
        writer.shutdown().unwrap();
        writer.shutdown().unwrap(); // idempotent
        writer.write(&Event::new(Severity::Info, "b")).unwrap();

        let calls = calls.0.lock();
        assert_eq!(calls.closes, 1);
        assert_eq!(calls.opens.len(), 2);
        assert!(calls.opens.iter().all(|(_, facility)| *facility == 16));
    }

    #[test]
    fn test_failed_send_is_runtime_error() {
        struct FailingSyslog;
        impl SyslogSink for FailingSyslog {
            fn open(&mut self, _: &str, _: i32) -> std::io::Result<()> {
                Ok(())
            }
            fn send(&mut self, _: Severity, _: &str) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "syslog gone"))
            }
            fn close(&mut self) {}
        }

        let mut writer = SyslogWriter::new(Box::new(FailingSyslog), "myapp");
        let err = writer.write(&Event::new(Severity::Error, "m")).unwrap_err();
        assert!(err.to_string().contains("Unable to write"));
    }
}
