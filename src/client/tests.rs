use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use super::realtime_client::{ConnectionState, RealtimeClient};
use crate::config::{ConnectionSettings, HeartbeatSettings, ReconnectSettings, Settings};
use crate::utils::error::ClientError;

/// Settings pointing at a port with nothing listening, so every open fails.
fn unreachable_settings(max_attempts: u32, interval_ms: u64) -> Settings {
    Settings {
        connection: ConnectionSettings {
            endpoint: Some("ws://127.0.0.1:1".to_string()),
            origin: "http://127.0.0.1:1".to_string(),
        },
        reconnect: ReconnectSettings {
            max_attempts,
            interval_ms,
        },
        heartbeat: HeartbeatSettings { interval_ms: 30_000 },
    }
}

#[tokio::test]
async fn test_send_while_disconnected_fails() {
    let client = RealtimeClient::new(unreachable_settings(0, 10));
    let result = client.send("location", json!({"lat": 49.61, "lng": 6.13}));
    assert!(matches!(result, Err(ClientError::NotConnected)));
    assert_eq!(client.state(), ConnectionState::Idle);
}

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let client = RealtimeClient::new(unreachable_settings(0, 10));
    client.disconnect();
    client.disconnect();
    assert_eq!(client.state(), ConnectionState::Idle);
    assert_eq!(client.reconnect_attempts(), 0);
}

#[tokio::test]
async fn test_subscription_handle_deregisters() {
    let client = RealtimeClient::new(unreachable_settings(0, 10));
    let hits = Arc::new(Mutex::new(0u32));
    let hits_clone = hits.clone();
    let subscription = client.subscribe("ride_update", move |_| {
        *hits_clone.lock().unwrap() += 1;
    });

    subscription.unsubscribe();

    // Drive the registry directly; nothing should be delivered.
    let delivered = client
        .shared
        .registry
        .lock()
        .unwrap()
        .dispatch("ride_update", json!({}));
    assert!(!delivered);
    assert_eq!(*hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_reconnect_stops_at_ceiling() {
    let client = RealtimeClient::new(unreachable_settings(3, 25));
    client.connect();

    // 1 manual attempt + 3 scheduled retries, all refused immediately.
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(client.reconnect_attempts(), 3);
    assert_eq!(client.state(), ConnectionState::Closed);

    // No further attempts are ever scheduled.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(client.reconnect_attempts(), 3);
}

#[tokio::test]
async fn test_manual_connect_does_not_reset_attempts() {
    let client = RealtimeClient::new(unreachable_settings(2, 20));
    client.connect();
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(client.reconnect_attempts(), 2);

    client.connect();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        client.reconnect_attempts(),
        2,
        "only a successful open resets the counter"
    );
}

#[tokio::test]
async fn test_disconnect_cancels_pending_reconnect() {
    let client = RealtimeClient::new(unreachable_settings(5, 100));
    client.connect();

    // Let the first attempt fail and a retry get scheduled, then tear down.
    tokio::time::sleep(Duration::from_millis(40)).await;
    client.disconnect();

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(client.state(), ConnectionState::Idle);
    assert_eq!(
        client.reconnect_attempts(),
        0,
        "a stale reconnect timer must not resurrect the connection"
    );
}

#[tokio::test]
async fn test_connect_twice_spawns_single_attempt() {
    let client = RealtimeClient::new(unreachable_settings(0, 10));
    client.connect();
    client.connect();
    tokio::time::sleep(Duration::from_millis(200)).await;
    // Ceiling of zero: the single manual attempt fails and nothing retries.
    assert_eq!(client.state(), ConnectionState::Closed);
    assert_eq!(client.reconnect_attempts(), 0);
}
