//! WebSocket connection loop.
//!
//! This file owns one live connection from open to close. Responsibilities:
//! - Resolve the endpoint and perform the WebSocket handshake
//! - Pump outbound frames from the client into the socket
//! - Parse inbound frames, consume heartbeat acknowledgments, and forward
//!   everything else to the handler registry
//! - Send heartbeat probes at a fixed interval and force a reconnect when
//!   the connection goes silently dead
//! - Hand control to the reconnection policy once the connection is lost
//!
//! Every state mutation is guarded by a connection-epoch check so that a
//! socket event or timer that fires after `disconnect()` is a no-op.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, trace, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::client::realtime_client::{ClientShared, ConnectionState};
use crate::heartbeat::HeartbeatState;
use crate::transport::endpoint::resolve_endpoint;
use crate::transport::message::{self, Frame, HeartbeatAck};
use crate::utils::error::ClientError;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Performs the WebSocket handshake against `endpoint`.
pub async fn open(endpoint: &str) -> Result<WsStream, ClientError> {
    let (stream, _response) = connect_async(endpoint).await?;
    Ok(stream)
}

/// Drives one connection attempt and, on success, the full lifetime of the
/// resulting connection. Spawned by `ClientShared::start_connect`.
pub(crate) async fn run_connection(shared: Arc<ClientShared>, epoch: u64) {
    let endpoint = match resolve_endpoint(
        shared.settings.connection.endpoint.as_deref(),
        &shared.settings.connection.origin,
    ) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            warn!(client = %shared.id, error = %e, "cannot resolve endpoint");
            abort_attempt(&shared, epoch, &e.to_string());
            return;
        }
    };

    debug!(client = %shared.id, endpoint = %endpoint, "opening websocket");
    let ws = match open(&endpoint).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(client = %shared.id, endpoint = %endpoint, error = %e, "websocket connect failed");
            abort_attempt(&shared, epoch, &e.to_string());
            return;
        }
    };

    let (mut sink, mut stream) = ws.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    {
        // Epoch checked under the lock: a disconnect() that completed since
        // the handshake must not have its teardown overwritten.
        let mut conn = shared.conn.lock().unwrap();
        if !shared.is_current(epoch) {
            debug!(client = %shared.id, "client disconnected during handshake, dropping socket");
            return;
        }
        conn.state = ConnectionState::Open;
        conn.outbound = Some(tx);
        conn.policy.reset();
    }
    info!(client = %shared.id, endpoint = %endpoint, "websocket connected");
    if let Some(on_open) = &shared.callbacks.on_open {
        on_open();
    }

    let mut heartbeat = HeartbeatState::new(Duration::from_millis(
        shared.settings.heartbeat.interval_ms,
    ));
    let mut ticker = time::interval_at(
        time::Instant::now() + heartbeat.interval(),
        heartbeat.interval(),
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(msg)) => {
                    if !shared.is_current(epoch) {
                        break;
                    }
                    if msg.is_close() {
                        debug!(client = %shared.id, "close frame received");
                        break;
                    }
                    if msg.is_text() {
                        match msg.to_text() {
                            Ok(text) => handle_frame(&shared, &mut heartbeat, text),
                            Err(e) => warn!(client = %shared.id, error = %e, "unreadable text frame dropped"),
                        }
                    }
                }
                Some(Err(e)) => {
                    warn!(client = %shared.id, error = %e, "websocket error");
                    if !shared.is_current(epoch) {
                        break;
                    }
                    // The error callback fires here; closure itself is driven
                    // by the stream ending.
                    if let Some(on_error) = &shared.callbacks.on_error {
                        on_error(&e.to_string());
                    }
                }
                None => break,
            },
            outgoing = rx.recv() => match outgoing {
                Some(text) => {
                    if let Err(e) = sink.send(WsMessage::text(text)).await {
                        warn!(client = %shared.id, error = %e, "websocket write failed");
                        break;
                    }
                }
                // `disconnect()` dropped the sender.
                None => break,
            },
            _ = ticker.tick() => {
                if !shared.is_current(epoch) {
                    break;
                }
                match serde_json::to_string(&Frame::heartbeat()) {
                    Ok(probe) => {
                        if let Err(e) = sink.send(WsMessage::text(probe)).await {
                            warn!(client = %shared.id, error = %e, "heartbeat write failed");
                            break;
                        }
                    }
                    Err(e) => warn!(client = %shared.id, error = %e, "failed to serialize heartbeat probe"),
                }
                if heartbeat.is_stale() {
                    warn!(client = %shared.id, "no heartbeat response, forcing reconnect");
                    break;
                }
            }
        }
    }

    let _ = sink.close().await;

    {
        let mut conn = shared.conn.lock().unwrap();
        if !shared.is_current(epoch) {
            return;
        }
        conn.state = ConnectionState::Closed;
        conn.outbound = None;
    }
    info!(client = %shared.id, "websocket closed");
    if let Some(on_close) = &shared.callbacks.on_close {
        on_close();
    }
    shared.schedule_reconnect(epoch);
}

/// Marks a failed open as a close and lets the reconnection policy decide
/// what happens next.
fn abort_attempt(shared: &Arc<ClientShared>, epoch: u64, reason: &str) {
    {
        let mut conn = shared.conn.lock().unwrap();
        if !shared.is_current(epoch) {
            return;
        }
        conn.state = ConnectionState::Closed;
        conn.outbound = None;
    }
    if let Some(on_error) = &shared.callbacks.on_error {
        on_error(reason);
    }
    if let Some(on_close) = &shared.callbacks.on_close {
        on_close();
    }
    shared.schedule_reconnect(epoch);
}

/// Parses one inbound text frame and routes it.
///
/// Malformed frames are logged and dropped without terminating the
/// connection. Heartbeat acknowledgments are recorded and never routed.
fn handle_frame(shared: &Arc<ClientShared>, heartbeat: &mut HeartbeatState, text: &str) {
    let frame: Frame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(client = %shared.id, error = %e, "malformed frame dropped");
            return;
        }
    };

    if frame.kind == message::HEARTBEAT_ACK {
        match serde_json::from_value::<HeartbeatAck>(frame.payload) {
            Ok(ack) => {
                trace!(client = %shared.id, timestamp = ack.timestamp, "heartbeat acknowledged");
            }
            Err(e) => {
                debug!(client = %shared.id, error = %e, "heartbeat ack with unexpected payload");
            }
        }
        // The frame itself proves liveness, whatever its payload shape.
        heartbeat.record_ack();
        return;
    }

    let delivered = shared
        .registry
        .lock()
        .unwrap()
        .dispatch(&frame.kind, frame.payload);
    if !delivered {
        debug!(client = %shared.id, kind = %frame.kind, "no handler registered, frame ignored");
    }
}
