//! The `client` module provides the public facade of the real-time
//! connection client.
//!
//! It exposes the `RealtimeClient`, which owns the connection lifecycle
//! (connect, disconnect, send) and the handler registry (subscribe). The
//! client is an explicitly constructed, explicitly owned instance: the
//! embedding application decides whether it is shared process-wide or
//! instantiated per view (e.g. a driver app and a rider app in the same
//! process).

pub mod realtime_client;

pub use realtime_client::{ConnectionState, EventCallbacks, RealtimeClient, Subscription};

#[cfg(test)]
mod tests;
