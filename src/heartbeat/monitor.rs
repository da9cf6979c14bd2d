use std::time::{Duration, Instant};

/// Liveness bookkeeping for one connection.
///
/// The staleness baseline starts at the instant the connection opened, not at
/// an unset zero value, so the check cannot fire before at least two full
/// probe intervals have elapsed without an acknowledgment.
#[derive(Debug, Clone)]
pub struct HeartbeatState {
    interval: Duration,
    started: Instant,
    last_ack: Option<Instant>,
}

impl HeartbeatState {
    /// Creates the state for a freshly-opened connection.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started: Instant::now(),
            last_ack: None,
        }
    }

    /// Records receipt of a heartbeat acknowledgment.
    pub fn record_ack(&mut self) {
        self.last_ack = Some(Instant::now());
    }

    /// Whether the connection should be treated as silently dead.
    ///
    /// True when no acknowledgment has been recorded within twice the probe
    /// interval, measured from the last ack or, before the first ack, from
    /// the instant the connection opened.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Instant::now())
    }

    pub fn is_stale_at(&self, now: Instant) -> bool {
        let last_seen = self.last_ack.unwrap_or(self.started);
        now.saturating_duration_since(last_seen) > self.interval * 2
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
