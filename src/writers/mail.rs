//! Batching mail writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, Result, Severity};

/// Opaque message-send capability of a mail transport
pub trait MailTransport: Send + Sync {
    fn send(&mut self, subject: &str, body: &str) -> std::io::Result<()>;
}

/// Collects formatted lines and sends them as a single message on
/// shutdown.
///
/// The subject gains a per-severity tally of the batched events, most
/// severe first, e.g. `errors on host (ERR=2, WARN=1)`. An empty batch
/// sends nothing. `Drop` makes a best-effort send for batches never
/// shut down explicitly.
pub struct MailWriter {
    base: WriterBase,
    transport: Box<dyn MailTransport>,
    subject: String,
    lines: Vec<String>,
    severity_counts: [usize; 8],
}

impl MailWriter {
    pub fn new(transport: Box<dyn MailTransport>, subject: impl Into<String>) -> Self {
        Self {
            base: WriterBase::new(),
            transport,
            subject: subject.into(),
            lines: Vec::new(),
            severity_counts: [0; 8],
        }
    }

    pub fn batched_count(&self) -> usize {
        self.lines.len()
    }

    fn tallied_subject(&self) -> String {
        let tallies: Vec<String> = Severity::ALL
            .iter()
            .filter(|severity| self.severity_counts[severity.value() as usize] > 0)
            .map(|severity| {
                format!(
                    "{}={}",
                    severity.name(),
                    self.severity_counts[severity.value() as usize]
                )
            })
            .collect();
        if tallies.is_empty() {
            self.subject.clone()
        } else {
            format!("{} ({})", self.subject, tallies.join(", "))
        }
    }

    fn send_batch(&mut self) -> Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }
        let subject = self.tallied_subject();
        let body = self.lines.join("\n");
        self.lines.clear();
        self.severity_counts = [0; 8];
        let result = self.transport.send(&subject, &body);
        self.base.guard(result)
    }
}

impl Writer for MailWriter {
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
        self.lines.push(self.base.render(event).into_text());
        self.severity_counts[event.severity.value() as usize] += 1;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.send_batch()
    }

    fn name(&self) -> &str {
        "mail"
    }
}

impl Drop for MailWriter {
    fn drop(&mut self) {
        let _ = self.send_batch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::SimpleFormatter;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FakeTransport(Arc<Mutex<Vec<(String, String)>>>);

    impl MailTransport for FakeTransport {
        fn send(&mut self, subject: &str, body: &str) -> std::io::Result<()> {
            self.0.lock().push((subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn message_only_writer(transport: FakeTransport, subject: &str) -> MailWriter {
        let mut writer = MailWriter::new(Box::new(transport), subject);
        writer
            .set_formatter(FormatterSpec::from(SimpleFormatter::with_template("%message%")))
            .unwrap();
        writer
    }

    #[test]
    fn test_batch_sent_once_on_shutdown() {
        let transport = FakeTransport::default();
        let sent = transport.clone();
        let mut writer = message_only_writer(transport, "nightly run");

        writer.write(&Event::new(Severity::Warning, "slow query")).unwrap();
        writer.write(&Event::new(Severity::Error, "query failed")).unwrap();
        writer.write(&Event::new(Severity::Error, "retry failed")).unwrap();
        assert!(sent.0.lock().is_empty());

        writer.shutdown().unwrap();
        writer.shutdown().unwrap(); // empty batch, no second message

        let sent = sent.0.lock();
        assert_eq!(sent.len(), 1);
        let (subject, body) = &sent[0];
        assert_eq!(subject, "nightly run (ERR=2, WARN=1)");
        assert_eq!(body, "slow query\nquery failed\nretry failed");
    }

    #[test]
    fn test_empty_batch_sends_nothing() {
        let transport = FakeTransport::default();
        let sent = transport.clone();
        let mut writer = message_only_writer(transport, "nightly run");

        writer.shutdown().unwrap();
        drop(writer);

        assert!(sent.0.lock().is_empty());
    }

    #[test]
    fn test_drop_sends_pending_batch() {
        let transport = FakeTransport::default();
        let sent = transport.clone();
        let mut writer = message_only_writer(transport, "job");

        writer.write(&Event::new(Severity::Info, "done")).unwrap();
        drop(writer);

        let sent = sent.0.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "job (INFO=1)");
    }

    #[test]
    fn test_failed_send_is_runtime_error() {
        struct FailingTransport;
        impl MailTransport for FailingTransport {
            fn send(&mut self, _: &str, _: &str) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "smtp refused"))
            }
        }

        let mut writer = MailWriter::new(Box::new(FailingTransport), "job");
        writer.write(&Event::new(Severity::Error, "m")).unwrap();
        let err = writer.shutdown().unwrap_err();
        assert!(err.to_string().contains("Unable to write"));
    }
}
