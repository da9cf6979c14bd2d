//! The `reconnect` module governs whether and when to retry after a
//! connection loss.
//!
//! The policy is deliberately simple: a bounded attempt counter and a fixed
//! inter-attempt delay, with no exponential backoff and no jitter. This is a
//! best-effort UI refresh channel, not a distributed-systems retry
//! discipline.

pub mod policy;

pub use policy::ReconnectPolicy;
