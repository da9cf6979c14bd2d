use serde::Deserialize;

/// Top-level configuration settings for the real-time client.
///
/// Includes connection endpoint resolution, reconnection policy and
/// heartbeat parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub reconnect: ReconnectSettings,
    pub heartbeat: HeartbeatSettings,
}

/// Configuration settings for endpoint resolution.
///
/// An explicit `endpoint` override (a `ws://` or `wss://` URL) takes
/// precedence; otherwise the endpoint is derived from `origin` with the
/// scheme upgraded for WebSocket transport.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionSettings {
    pub endpoint: Option<String>,
    pub origin: String,
}

/// Configuration settings for the reconnection policy.
///
/// `max_attempts` bounds automatic reconnects; `interval_ms` is the fixed
/// delay between attempts. There is no backoff and no jitter.
#[derive(Debug, Deserialize, Clone)]
pub struct ReconnectSettings {
    pub max_attempts: u32,
    pub interval_ms: u64,
}

/// Configuration settings for the heartbeat monitor.
#[derive(Debug, Deserialize, Clone)]
pub struct HeartbeatSettings {
    pub interval_ms: u64,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub connection: Option<PartialConnectionSettings>,
    pub reconnect: Option<PartialReconnectSettings>,
    pub heartbeat: Option<PartialHeartbeatSettings>,
}

/// Partial connection settings.
///
/// Used when loading connection configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialConnectionSettings {
    pub endpoint: Option<String>,
    pub origin: Option<String>,
}

/// Partial reconnect settings.
#[derive(Debug, Deserialize)]
pub struct PartialReconnectSettings {
    pub max_attempts: Option<u32>,
    pub interval_ms: Option<u64>,
}

/// Partial heartbeat settings.
#[derive(Debug, Deserialize)]
pub struct PartialHeartbeatSettings {
    pub interval_ms: Option<u64>,
}

/// Provides default values for `Settings`.
///
/// Ensures the client has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings {
                endpoint: None,
                origin: "http://127.0.0.1:8080".to_string(),
            },
            reconnect: ReconnectSettings {
                max_attempts: 5,
                interval_ms: 2000,
            },
            heartbeat: HeartbeatSettings {
                interval_ms: 30_000,
            },
        }
    }
}
