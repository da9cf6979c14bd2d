//! The `router` module maps incoming message types to registered handlers.
//!
//! It provides the `HandlerRegistry`, the mapping from a frame's type string
//! to the single callback that processes its payload. Registration is
//! last-wins per type, and frames with no registered handler are ignored.

pub mod registry;

pub use registry::{Handler, HandlerRegistry};

#[cfg(test)]
mod tests;
