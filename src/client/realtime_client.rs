use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::reconnect::ReconnectPolicy;
use crate::router::{Handler, HandlerRegistry};
use crate::transport::message::Frame;
use crate::transport::websocket;
use crate::utils::error::ClientError;

/// Lifecycle state of the client's single connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection has been requested, or `disconnect()` was called.
    Idle,
    /// An open attempt is in flight.
    Connecting,
    /// The connection is established.
    Open,
    /// The connection was lost; the reconnection policy decides what is next.
    Closed,
}

/// Optional side-effect hooks invoked on connection lifecycle events.
///
/// These exist so the embedding application can surface a "reconnecting"
/// indicator or similar; the client itself has no UI.
#[derive(Clone, Default)]
pub struct EventCallbacks {
    pub on_open: Option<Arc<dyn Fn() + Send + Sync>>,
    pub on_close: Option<Arc<dyn Fn() + Send + Sync>>,
    pub on_error: Option<Arc<dyn Fn(&str) + Send + Sync>>,
}

/// State shared between the client facade and its connection task.
pub(crate) struct ClientShared {
    pub(crate) id: String,
    pub(crate) settings: Settings,
    pub(crate) callbacks: EventCallbacks,
    pub(crate) registry: Mutex<HandlerRegistry>,
    pub(crate) conn: Mutex<ConnectionInner>,
    /// Bumped by `disconnect()`. Connection tasks and scheduled reconnects
    /// carry the epoch they were spawned under and become no-ops once it is
    /// stale.
    pub(crate) epoch: AtomicU64,
}

pub(crate) struct ConnectionInner {
    pub(crate) state: ConnectionState,
    pub(crate) outbound: Option<UnboundedSender<String>>,
    pub(crate) policy: ReconnectPolicy,
}

impl ClientShared {
    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    /// Spawns a connection task unless one is already open or in flight.
    pub(crate) fn start_connect(self: &Arc<Self>) {
        {
            let mut conn = self.conn.lock().unwrap();
            match conn.state {
                ConnectionState::Connecting | ConnectionState::Open => {
                    debug!(client = %self.id, "connect ignored, connection already active");
                    return;
                }
                ConnectionState::Idle | ConnectionState::Closed => {
                    conn.state = ConnectionState::Connecting;
                }
            }
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            websocket::run_connection(shared, epoch).await;
        });
    }

    /// Consults the reconnection policy after a close and schedules at most
    /// one future `connect()`.
    pub(crate) fn schedule_reconnect(self: &Arc<Self>, epoch: u64) {
        let decision = {
            let mut conn = self.conn.lock().unwrap();
            // Epoch checked under the lock so a concurrent disconnect()
            // cannot have its counter reset overwritten.
            if !self.is_current(epoch) {
                return;
            }
            let max_attempts = conn.policy.max_attempts();
            conn.policy
                .next_attempt()
                .map(|delay| (delay, conn.policy.attempts(), max_attempts))
        };
        match decision {
            None => {
                warn!(client = %self.id, "reconnect ceiling reached, giving up");
            }
            Some((delay, attempt, max_attempts)) => {
                info!(
                    client = %self.id,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "scheduling reconnect"
                );
                let shared = Arc::clone(self);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if !shared.is_current(epoch) {
                        debug!(client = %shared.id, "reconnect cancelled, client disconnected");
                        return;
                    }
                    shared.start_connect();
                });
            }
        }
    }
}

/// Handle returned by `RealtimeClient::subscribe` that removes the
/// registration when consumed.
pub struct Subscription {
    kind: String,
    shared: Weak<ClientShared>,
}

impl Subscription {
    /// De-registers the handler this subscription refers to.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.registry.lock().unwrap().unsubscribe(&self.kind);
        }
    }
}

/// Real-time connection client for ride and driver state.
///
/// Owns at most one live WebSocket connection at a time. Connection loss is
/// recovered automatically up to the configured reconnect ceiling; a client
/// whose ceiling is exhausted stays down until the next manual `connect()`.
pub struct RealtimeClient {
    pub(crate) shared: Arc<ClientShared>,
}

impl RealtimeClient {
    /// Creates a client with no lifecycle callbacks.
    pub fn new(settings: Settings) -> Self {
        Self::with_callbacks(settings, EventCallbacks::default())
    }

    /// Creates a client that invokes `callbacks` on open, close and error.
    pub fn with_callbacks(settings: Settings, callbacks: EventCallbacks) -> Self {
        let policy = ReconnectPolicy::new(
            settings.reconnect.max_attempts,
            Duration::from_millis(settings.reconnect.interval_ms),
        );
        Self {
            shared: Arc::new(ClientShared {
                id: format!("client-{}", Uuid::new_v4()),
                settings,
                callbacks,
                registry: Mutex::new(HandlerRegistry::new()),
                conn: Mutex::new(ConnectionInner {
                    state: ConnectionState::Idle,
                    outbound: None,
                    policy,
                }),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Unique identifier of this client instance, used in log lines.
    pub fn id(&self) -> &str {
        &self.shared.id
    }

    /// Requests a connection.
    ///
    /// No-op if a connection is already open or an open attempt is in
    /// flight. A manual `connect()` never resets the attempt counter; only a
    /// successful open does.
    pub fn connect(&self) {
        self.shared.start_connect();
    }

    /// Tears the client down: stops the heartbeat, closes the transport,
    /// clears the handler registry and resets the attempt counter.
    ///
    /// Idempotent. Any socket callback or scheduled reconnect that fires
    /// after this call observes a stale epoch and does nothing.
    pub fn disconnect(&self) {
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        {
            let mut conn = self.shared.conn.lock().unwrap();
            conn.state = ConnectionState::Idle;
            // Dropping the sender ends the connection loop, which closes the
            // socket.
            conn.outbound = None;
            conn.policy.reset();
        }
        self.shared.registry.lock().unwrap().clear();
        info!(client = %self.shared.id, "client disconnected");
    }

    /// Serializes `{type, payload}` and writes it if the connection is open.
    ///
    /// Frames are never queued: while disconnected the failure is logged and
    /// returned synchronously.
    pub fn send(&self, kind: &str, payload: Value) -> Result<(), ClientError> {
        let text = serde_json::to_string(&Frame::new(kind, payload))?;
        let conn = self.shared.conn.lock().unwrap();
        match (conn.state, &conn.outbound) {
            (ConnectionState::Open, Some(tx)) => {
                if tx.send(text).is_err() {
                    warn!(client = %self.shared.id, kind, "connection closing, frame dropped");
                    return Err(ClientError::NotConnected);
                }
                Ok(())
            }
            _ => {
                warn!(client = %self.shared.id, kind, "send while not connected, frame dropped");
                Err(ClientError::NotConnected)
            }
        }
    }

    /// Registers `handler` for frames of type `kind`, replacing any prior
    /// handler for that type. Returns a handle that de-registers it.
    pub fn subscribe<F>(&self, kind: &str, handler: F) -> Subscription
    where
        F: FnMut(Value) + Send + 'static,
    {
        self.shared
            .registry
            .lock()
            .unwrap()
            .subscribe(kind, Box::new(handler) as Handler);
        Subscription {
            kind: kind.to_string(),
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.shared.conn.lock().unwrap().state
    }

    /// Number of reconnect attempts since the last successful open.
    pub fn reconnect_attempts(&self) -> u32 {
        self.shared.conn.lock().unwrap().policy.attempts()
    }
}
