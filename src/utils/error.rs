use thiserror::Error;

/// Errors surfaced by the real-time client.
///
/// Transient connectivity loss is not represented here: it is recovered
/// automatically by the reconnection policy and reported only through the
/// optional `on_close`/`on_error` callbacks.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured endpoint or origin could not be turned into a
    /// WebSocket URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A send was attempted while no connection was open. The frame is
    /// dropped, never queued.
    #[error("not connected")]
    NotConnected,

    /// The underlying WebSocket failed.
    #[error("websocket error: {0}")]
    Transport(#[from] tungstenite::Error),

    /// A frame could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
