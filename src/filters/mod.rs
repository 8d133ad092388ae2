//! Filter implementations
//!
//! Filters are boolean gates evaluated per-writer: a rejecting filter
//! short-circuits delivery for that writer. Malformed filter construction
//! is caught at setup time; `accept` never fails for well-formed events.

pub mod mock;
pub mod operator;
pub mod priority;
pub mod regex;
pub mod sample;
pub mod suppress;
pub mod timestamp;
pub mod validator;

pub use mock::MockFilter;
pub use operator::Operator;
pub use priority::PriorityFilter;
pub use regex::RegexFilter;
pub use sample::SampleFilter;
pub use suppress::SuppressFilter;
pub use timestamp::{DatePart, TimestampFilter};
pub use validator::ValidatorFilter;

use crate::core::Event;

pub trait Filter: Send + Sync {
    /// Returns `true` to accept the event, `false` to reject it
    fn accept(&self, event: &Event) -> bool;
    fn name(&self) -> &str;
}
