//! Reference id processor

use super::request_id::process_request_id;
use super::Processor;
use crate::core::{Event, Value};
use parking_lot::RwLock;

/// Injects a `referenceId` into `extra`, unless already present.
///
/// By default the process-stable request id is used, but a caller can pin
/// a custom reference id (e.g. a correlation id from an upstream request)
/// via [`set_reference_id`](Self::set_reference_id).
#[derive(Default)]
pub struct ReferenceIdProcessor {
    reference_id: RwLock<Option<String>>,
}

impl ReferenceIdProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id that will be injected into subsequent events
    pub fn reference_id(&self) -> String {
        self.reference_id
            .read()
            .clone()
            .unwrap_or_else(|| process_request_id().to_string())
    }

    /// Pin a custom reference id for subsequent events
    pub fn set_reference_id(&self, id: impl Into<String>) {
        *self.reference_id.write() = Some(id.into());
    }
}

impl Processor for ReferenceIdProcessor {
    fn process(&self, mut event: Event) -> Event {
        event.set_extra_if_absent("referenceId", Value::from(self.reference_id()));
        event
    }

    fn name(&self) -> &str {
        "reference_id"
    }
}
