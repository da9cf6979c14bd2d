mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{ConnectionSettings, HeartbeatSettings, ReconnectSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the connection, reconnect and
/// heartbeat configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        connection: ConnectionSettings {
            endpoint: partial
                .connection
                .as_ref()
                .and_then(|c| c.endpoint.clone())
                .or(default.connection.endpoint),
            origin: partial
                .connection
                .as_ref()
                .and_then(|c| c.origin.clone())
                .unwrap_or(default.connection.origin),
        },
        reconnect: ReconnectSettings {
            max_attempts: partial
                .reconnect
                .as_ref()
                .and_then(|r| r.max_attempts)
                .unwrap_or(default.reconnect.max_attempts),
            interval_ms: partial
                .reconnect
                .as_ref()
                .and_then(|r| r.interval_ms)
                .unwrap_or(default.reconnect.interval_ms),
        },
        heartbeat: HeartbeatSettings {
            interval_ms: partial
                .heartbeat
                .as_ref()
                .and_then(|h| h.interval_ms)
                .unwrap_or(default.heartbeat.interval_ms),
        },
    })
}
