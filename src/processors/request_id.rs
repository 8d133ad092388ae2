//! Request id processor

use super::Processor;
use crate::core::{Event, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Identifier stable for the lifetime of the process: a hash of the time
/// the id was first requested and the process id, rendered as hex.
pub(crate) fn process_request_id() -> &'static str {
    REQUEST_ID.get_or_init(|| {
        let mut hasher = DefaultHasher::new();
        std::process::id().hash(&mut hasher);
        if let Ok(elapsed) = SystemTime::now().duration_since(UNIX_EPOCH) {
            elapsed.as_nanos().hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    })
}

/// Injects a process-stable `requestId` into `extra`, unless the caller
/// already supplied one.
#[derive(Default)]
pub struct RequestIdProcessor;

impl RequestIdProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn request_id(&self) -> &'static str {
        process_request_id()
    }
}

impl Processor for RequestIdProcessor {
    fn process(&self, mut event: Event) -> Event {
        event.set_extra_if_absent("requestId", Value::from(process_request_id()));
        event
    }

    fn name(&self) -> &str {
        "request_id"
    }
}
