//! Consecutive-failure circuit breaker for one verification pass

use crate::domain::ProbeOutcome;

/// Default number of consecutive transport failures that end a pass
pub const DEFAULT_EXCEPTION_THRESHOLD: u32 = 3;

/// Counts consecutive transport failures
///
/// Any definitive answer from the repository (whatever the status) resets the
/// count. Once tripped, the runner stops probing until the next pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreaker {
    threshold: u32,
    consecutive: u32,
}

impl CircuitBreaker {
    /// Create a breaker; a zero threshold is raised to one
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive: 0,
        }
    }

    /// Record a probe outcome
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        if outcome.is_definitive() {
            self.consecutive = 0;
        } else {
            self.consecutive += 1;
        }
    }

    /// Clear the failure count
    pub fn reset(&mut self) {
        self.consecutive = 0;
    }

    /// Returns true once the threshold is reached
    pub fn is_tripped(&self) -> bool {
        self.consecutive >= self.threshold
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_EXCEPTION_THRESHOLD)
    }
}
