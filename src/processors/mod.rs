//! Processor implementations
//!
//! Processors enrich an event before any writer sees it. They run in
//! priority order, each receiving the previous processor's output, and
//! must not fail for well-formed events. Derived fields never overwrite
//! caller-supplied `extra` keys.

pub mod backtrace;
pub mod placeholder;
pub mod reference_id;
pub mod request_id;

pub use backtrace::BacktraceProcessor;
pub use placeholder::PlaceholderProcessor;
pub use reference_id::ReferenceIdProcessor;
pub use request_id::RequestIdProcessor;

use crate::core::Event;

pub trait Processor: Send + Sync {
    /// Returns a revised copy of the event; may be a no-op
    fn process(&self, event: Event) -> Event;
    fn name(&self) -> &str;
}
