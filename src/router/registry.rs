use std::collections::HashMap;

use serde_json::Value;

/// Callback invoked with the payload of every frame of its registered type.
pub type Handler = Box<dyn FnMut(Value) + Send>;

/// Maps a message-type string to the single currently-registered handler.
///
/// Keys are unique: registering a handler for a type that already has one
/// overwrites the previous registration. Unknown types are not an error
/// condition; dispatching them simply reports that nothing was delivered.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for `kind`, replacing any prior handler.
    pub fn subscribe(&mut self, kind: &str, handler: Handler) {
        self.handlers.insert(kind.to_string(), handler);
    }

    /// Removes the handler for `kind`, if any.
    pub fn unsubscribe(&mut self, kind: &str) {
        self.handlers.remove(kind);
    }

    /// Invokes the handler registered for `kind` with `payload`.
    ///
    /// Returns `true` if a handler was invoked, `false` if no handler is
    /// registered for that type.
    pub fn dispatch(&mut self, kind: &str, payload: Value) -> bool {
        match self.handlers.get_mut(kind) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    /// Drops every registration. Used on full disconnect.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Whether a handler is registered for `kind`.
    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
