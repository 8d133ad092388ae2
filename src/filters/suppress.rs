//! Suppress toggle filter

use super::Filter;
use crate::core::Event;
use std::sync::atomic::{AtomicBool, Ordering};

/// Rejects every event while suppression is switched on.
///
/// The toggle is runtime-flippable, so a writer can be muted and unmuted
/// without rebuilding its filter chain.
pub struct SuppressFilter {
    suppressed: AtomicBool,
}

impl SuppressFilter {
    pub fn new(suppressed: bool) -> Self {
        Self {
            suppressed: AtomicBool::new(suppressed),
        }
    }

    pub fn set_suppress(&self, suppressed: bool) {
        self.suppressed.store(suppressed, Ordering::Relaxed);
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::Relaxed)
    }
}

impl Default for SuppressFilter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Filter for SuppressFilter {
    fn accept(&self, _event: &Event) -> bool {
        !self.is_suppressed()
    }

    fn name(&self) -> &str {
        "suppress"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_toggle_at_runtime() {
        let filter = SuppressFilter::new(false);
        let event = Event::new(Severity::Info, "m");

        assert!(filter.accept(&event));

        filter.set_suppress(true);
        assert!(!filter.accept(&event));

        filter.set_suppress(false);
        assert!(filter.accept(&event));
    }

    #[test]
    fn test_initially_suppressed() {
        let filter = SuppressFilter::new(true);
        assert!(filter.is_suppressed());
        assert!(!filter.accept(&Event::new(Severity::Emergency, "m")));
    }
}
