//! The `heartbeat` module detects silently-dead connections that have not
//! produced a close event.
//!
//! The connection loop sends a `heartbeat` probe at a fixed interval and
//! records every `heartbeat_ack` it receives. `HeartbeatState` answers the
//! staleness question: has an acknowledgment been seen within twice the
//! probe interval?

pub mod monitor;

pub use monitor::HeartbeatState;

#[cfg(test)]
mod tests;
