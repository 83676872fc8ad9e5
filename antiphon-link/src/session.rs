//! Session statistics
//!
//! Success/failure bookkeeping for completed handshake attempts. The
//! counters sit outside the handshake's correctness logic; only the sender
//! role updates them, once per attempt.

/// Handshake attempt counters for one link endpoint
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionStats {
    succeeded: u32,
    failed: u32,
}

impl SessionStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an acknowledged send
    pub fn record_success(&mut self) {
        self.succeeded = self.succeeded.saturating_add(1);
    }

    /// Record a failed send attempt
    pub fn record_failure(&mut self) {
        self.failed = self.failed.saturating_add(1);
    }

    /// Number of acknowledged sends
    pub fn succeeded(&self) -> u32 {
        self.succeeded
    }

    /// Number of failed send attempts
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// Total completed attempts
    pub fn attempts(&self) -> u32 {
        self.succeeded.saturating_add(self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let mut stats = SessionStats::new();
        stats.record_success();
        stats.record_success();
        stats.record_failure();

        assert_eq!(stats.succeeded(), 2);
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.attempts(), 3);
    }
}
