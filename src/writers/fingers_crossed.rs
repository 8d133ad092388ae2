//! Buffering "fingers crossed" writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, LoggerError, Result, Severity};
use std::collections::VecDeque;

const DEFAULT_BUFFER_SIZE: usize = 1000;

/// Wraps a delegate writer and holds events back until something serious
/// happens.
///
/// Events are buffered up to a cap (oldest dropped past it). The first
/// event at least as severe as the action priority flushes the whole
/// buffer, oldest first, followed by the trigger itself; from then on
/// every event passes straight through. The latch is one-shot per
/// instance. Formatting belongs to the wrapped writer, so this writer
/// refuses a formatter of its own; its filter chain still applies.
pub struct FingersCrossedWriter {
    base: WriterBase,
    delegate: Box<dyn Writer>,
    buffer: VecDeque<Event>,
    buffer_size: usize,
    action_priority: Severity,
    triggered: bool,
}

impl FingersCrossedWriter {
    pub fn new(delegate: Box<dyn Writer>) -> Self {
        Self {
            base: WriterBase::new(),
            delegate,
            buffer: VecDeque::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            action_priority: Severity::Warning,
            triggered: false,
        }
    }

    /// Severity that releases the buffer (default: warning)
    #[must_use]
    pub fn with_action_priority(mut self, priority: Severity) -> Self {
        self.action_priority = priority;
        self
    }

    /// Cap on buffered events before the oldest are discarded
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn buffered_count(&self) -> usize {
        self.buffer.len()
    }

    fn flush_buffer(&mut self) -> Result<()> {
        while let Some(buffered) = self.buffer.pop_front() {
            self.delegate.write(&buffered)?;
        }
        Ok(())
    }
}

impl Writer for FingersCrossedWriter {
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.base.add_filter(spec)
    }

    fn set_formatter(&mut self, _spec: FormatterSpec) -> Result<()> {
        Err(LoggerError::invalid_argument(
            "FingersCrossedWriter",
            "formatting is delegated to the wrapped writer",
        ))
    }

    fn write(&mut self, event: &Event) -> Result<()> {
        if !self.base.accepts(event) {
            return Ok(());
        }

        if self.triggered {
            return self.delegate.write(event);
        }

        if event.severity.at_least(self.action_priority) {
            self.triggered = true;
            self.flush_buffer()?;
            return self.delegate.write(event);
        }

        self.buffer.push_back(event.clone());
        while self.buffer.len() > self.buffer_size {
            self.buffer.pop_front();
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        // Untriggered buffer contents are discarded by design.
        self.buffer.clear();
        self.delegate.shutdown()
    }

    fn name(&self) -> &str {
        "fingers_crossed"
    }
}
