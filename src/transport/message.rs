use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Reserved type for the client-to-server liveness probe.
pub const HEARTBEAT: &str = "heartbeat";

/// Reserved type for the server's liveness acknowledgment. Frames of this
/// type are consumed by the connection loop and never routed to handlers.
pub const HEARTBEAT_ACK: &str = "heartbeat_ack";

/// Ride lifecycle changes pushed by the backend.
pub const RIDE_UPDATE: &str = "ride_update";

/// Live driver position pushed by the backend during an active ride.
pub const DRIVER_LOCATION: &str = "driver_location";

/// One discrete message exchanged over the real-time connection.
///
/// Every frame, inbound or outbound, carries a type string and an arbitrary
/// JSON payload. Unknown payload shapes are legal at this level; consumers
/// that want validation deserialize the payload into one of the typed
/// structs below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Frame {
    pub fn new(kind: &str, payload: Value) -> Self {
        Self {
            kind: kind.to_string(),
            payload,
        }
    }

    /// Builds a heartbeat probe carrying the current wall-clock time.
    pub fn heartbeat() -> Self {
        Self::new(
            HEARTBEAT,
            json!({ "timestamp": Utc::now().timestamp_millis() }),
        )
    }
}

/// Payload of a `heartbeat_ack` frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatAck {
    pub timestamp: i64,
}

/// Payload of a `driver_location` frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub lat: f64,
    pub lng: f64,
}

/// Ride lifecycle states as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Requested,
    Accepted,
    DriverArriving,
    InProgress,
    Completed,
    Cancelled,
}

/// Payload of a `ride_update` frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideUpdate {
    pub ride_id: String,
    pub status: RideStatus,
}
