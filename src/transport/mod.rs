//! The `transport` module is responsible for handling network communication
//! with the backend, primarily via WebSockets.
//!
//! It defines the frame envelope exchanged between client and server,
//! resolves the endpoint to connect to, and implements the connection loop
//! itself: opening the socket, pumping frames in both directions, sending
//! heartbeat probes, and handing control to the reconnection policy when the
//! connection is lost.

pub mod endpoint;
pub mod message;
pub mod websocket;
