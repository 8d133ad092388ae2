//! Mock writer test double

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct Recorded {
    events: Vec<Event>,
    shutdown_called: bool,
}

/// Records every accepted event and whether `shutdown` was invoked.
///
/// Clones share the same recording, so a test can keep a handle while the
/// writer itself is moved into a logger.
#[derive(Clone)]
pub struct MockWriter {
    base: Arc<Mutex<WriterBase>>,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockWriter {
    pub fn new() -> Self {
        Self {
            base: Arc::new(Mutex::new(WriterBase::new())),
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.recorded.lock().events.clone()
    }

    pub fn event_count(&self) -> usize {
        self.recorded.lock().events.len()
    }

    pub fn shutdown_called(&self) -> bool {
        self.recorded.lock().shutdown_called
    }
}

impl Default for MockWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for MockWriter {
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.base.lock().add_filter(spec)
    }

    fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()> {
        self.base.lock().set_formatter(spec)
    }

    fn write(&mut self, event: &Event) -> Result<()> {
        if !self.base.lock().accepts(event) {
            return Ok(());
        }
        self.recorded.lock().events.push(event.clone());
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.recorded.lock().shutdown_called = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use crate::filters::PriorityFilter;

    #[test]
    fn test_records_events_and_shutdown() {
        let mut writer = MockWriter::new();
        let handle = writer.clone();

        writer.write(&Event::new(Severity::Info, "one")).unwrap();
        writer.write(&Event::new(Severity::Error, "two")).unwrap();
        writer.shutdown().unwrap();

        assert_eq!(handle.event_count(), 2);
        assert_eq!(handle.events()[1].message, "two");
        assert!(handle.shutdown_called());
    }

    #[test]
    fn test_filters_apply() {
        let mut writer = MockWriter::new();
        writer
            .add_filter(FilterSpec::from(PriorityFilter::new(Severity::Error)))
            .unwrap();

        writer.write(&Event::new(Severity::Debug, "dropped")).unwrap();
        writer.write(&Event::new(Severity::Alert, "kept")).unwrap();

        let events = writer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "kept");
    }
}
