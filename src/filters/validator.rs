//! Delegating validator filter

use super::Filter;
use crate::core::Event;

/// Predicate over a single message string
pub type Validator = dyn Fn(&str) -> bool + Send + Sync;

/// Delegates the accept decision to an externally supplied validator,
/// applied to the event's message.
pub struct ValidatorFilter {
    validator: Box<Validator>,
}

impl ValidatorFilter {
    pub fn new(validator: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            validator: Box::new(validator),
        }
    }
}

impl Filter for ValidatorFilter {
    fn accept(&self, event: &Event) -> bool {
        (self.validator)(&event.message)
    }

    fn name(&self) -> &str {
        "validator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_delegates_to_validator() {
        let filter = ValidatorFilter::new(|msg| msg.parse::<i64>().is_ok());

        assert!(filter.accept(&Event::new(Severity::Info, "12345")));
        assert!(!filter.accept(&Event::new(Severity::Info, "not a number")));
    }
}
