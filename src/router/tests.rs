use super::HandlerRegistry;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn recording_handler(log: Arc<Mutex<Vec<String>>>, tag: &'static str) -> super::Handler {
    Box::new(move |payload| {
        log.lock().unwrap().push(format!("{tag}:{payload}"));
    })
}

#[test]
fn test_dispatch_invokes_registered_handler() {
    let mut registry = HandlerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    registry.subscribe("ride_update", recording_handler(log.clone(), "h1"));

    let delivered = registry.dispatch("ride_update", json!({"ride_id": "r-1"}));

    assert!(delivered);
    assert_eq!(log.lock().unwrap().as_slice(), ["h1:{\"ride_id\":\"r-1\"}"]);
}

#[test]
fn test_last_registration_wins() {
    let mut registry = HandlerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    registry.subscribe("ride_update", recording_handler(log.clone(), "h1"));
    registry.subscribe("ride_update", recording_handler(log.clone(), "h2"));

    registry.dispatch("ride_update", json!("x"));

    assert_eq!(log.lock().unwrap().as_slice(), ["h2:\"x\""]);
}

#[test]
fn test_unknown_type_is_silently_ignored() {
    let mut registry = HandlerRegistry::new();
    let delivered = registry.dispatch("driver_location", json!({}));
    assert!(!delivered);
}

#[test]
fn test_unsubscribe_removes_handler() {
    let mut registry = HandlerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    registry.subscribe("ride_update", recording_handler(log.clone(), "h1"));

    registry.unsubscribe("ride_update");

    assert!(!registry.contains("ride_update"));
    assert!(!registry.dispatch("ride_update", json!({})));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_clear_removes_all_handlers() {
    let mut registry = HandlerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    registry.subscribe("ride_update", recording_handler(log.clone(), "h1"));
    registry.subscribe("driver_location", recording_handler(log.clone(), "h2"));

    registry.clear();

    assert!(registry.is_empty());
    assert!(!registry.dispatch("ride_update", json!({})));
    assert!(!registry.dispatch("driver_location", json!({})));
}

#[test]
fn test_same_type_frames_deliver_in_order() {
    let mut registry = HandlerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    registry.subscribe("ride_update", recording_handler(log.clone(), "h"));

    registry.dispatch("ride_update", json!(1));
    registry.dispatch("ride_update", json!(2));
    registry.dispatch("ride_update", json!(3));

    assert_eq!(log.lock().unwrap().as_slice(), ["h:1", "h:2", "h:3"]);
}
