//! Sampling filter for high-volume scenarios

use super::Filter;
use crate::core::{Event, LoggerError, Result};
use rand::Rng;

/// Accepts events with probability equal to the configured rate.
///
/// A rate of 1.0 accepts everything, 0.0 rejects everything. One uniform
/// draw per call, no state carried between events.
pub struct SampleFilter {
    rate: f64,
}

impl SampleFilter {
    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) || rate.is_nan() {
            return Err(LoggerError::invalid_argument(
                "SampleFilter",
                format!("sample rate {} is not within [0.0, 1.0]", rate),
            ));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Filter for SampleFilter {
    fn accept(&self, _event: &Event) -> bool {
        rand::thread_rng().gen::<f64>() < self.rate
    }

    fn name(&self) -> &str {
        "sample"
    }
}
