use super::HeartbeatState;
use std::time::{Duration, Instant};

const INTERVAL: Duration = Duration::from_secs(30);

#[test]
fn test_fresh_connection_is_not_stale() {
    let state = HeartbeatState::new(INTERVAL);
    let now = Instant::now();
    assert!(!state.is_stale_at(now));
}

#[test]
fn test_no_false_positive_on_first_interval() {
    // No ack has been recorded yet when the first tick fires; the baseline
    // is the open instant, so one elapsed interval is not stale.
    let state = HeartbeatState::new(INTERVAL);
    let now = Instant::now();
    assert!(!state.is_stale_at(now + INTERVAL));
    assert!(!state.is_stale_at(now + INTERVAL * 2));
}

#[test]
fn test_stale_after_two_silent_intervals() {
    let state = HeartbeatState::new(INTERVAL);
    let now = Instant::now();
    assert!(state.is_stale_at(now + INTERVAL * 2 + Duration::from_secs(1)));
}

#[test]
fn test_ack_refreshes_the_window() {
    let mut state = HeartbeatState::new(INTERVAL);
    state.record_ack();
    let now = Instant::now();
    assert!(!state.is_stale_at(now + INTERVAL));
    assert!(state.is_stale_at(now + INTERVAL * 3));
}

#[test]
fn test_past_instants_are_never_stale() {
    // A now earlier than the baseline saturates to zero elapsed time.
    let earlier = Instant::now();
    let state = HeartbeatState::new(INTERVAL);
    assert!(!state.is_stale_at(earlier));
}
