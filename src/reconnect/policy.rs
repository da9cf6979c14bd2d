use std::time::Duration;

/// Bounded, fixed-delay reconnection policy.
///
/// The attempt counter increments on every failed attempt and resets to zero
/// only on a successful open or a full disconnect, never on a manual
/// `connect()` call alone. Once the counter reaches the ceiling the policy
/// stops scheduling retries until it is reset.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    attempts: u32,
    max_attempts: u32,
    delay: Duration,
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            delay,
        }
    }

    /// Decides whether another reconnect may be attempted.
    ///
    /// Returns the delay to wait before the attempt, or `None` when the
    /// ceiling has been reached. The delay is constant across attempts.
    pub fn next_attempt(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.delay)
    }

    /// Resets the attempt counter, re-arming the policy.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
