//! # Ridelink
//!
//! `ridelink` is the real-time connection client of a ride-hailing platform.
//! It keeps a rider app or driver dashboard synchronized with the backend over
//! a single WebSocket channel, tolerating network interruptions with bounded
//! automatic reconnects and heartbeat-based liveness detection.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `client`: The public client facade that owns the connection lifecycle.
//! - `config`: Handles loading and managing client configuration.
//! - `heartbeat`: Tracks liveness acknowledgments to detect silently-dead connections.
//! - `reconnect`: The bounded, fixed-delay reconnection policy.
//! - `router`: Maps incoming message types to registered handlers.
//! - `transport`: Endpoint resolution, the frame envelope, and the WebSocket connection loop.
//! - `utils`: Contains shared utilities, such as error handling and logging setup.

pub mod client;
pub mod config;
pub mod heartbeat;
pub mod reconnect;
pub mod router;
pub mod transport;
pub mod utils;
