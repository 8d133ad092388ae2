//! No-op writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, Result};

/// Accepts and discards every event. Always succeeds.
pub struct NullWriter {
    base: WriterBase,
}

impl NullWriter {
    pub fn new() -> Self {
        Self {
            base: WriterBase::new(),
        }
    }
}

impl Default for NullWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for NullWriter {
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.base.add_filter(spec)
    }

    fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()> {
        self.base.set_formatter(spec)
    }

    fn write(&mut self, _event: &Event) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_always_succeeds() {
        let mut writer = NullWriter::new();
        for severity in Severity::ALL {
            writer.write(&Event::new(severity, "m")).unwrap();
        }
        writer.shutdown().unwrap();
    }
}
