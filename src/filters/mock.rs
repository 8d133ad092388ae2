//! Mock filter test double

use super::Filter;
use crate::core::Event;
use parking_lot::Mutex;
use std::sync::Arc;

/// Accepts every event and records it for later inspection.
///
/// Clones share the same recording, so a test can keep a handle while the
/// filter itself is moved into a writer.
#[derive(Clone, Default)]
pub struct MockFilter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MockFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }
}

impl Filter for MockFilter {
    fn accept(&self, event: &Event) -> bool {
        self.events.lock().push(event.clone());
        true
    }

    fn name(&self) -> &str {
        "mock"
    }
}
