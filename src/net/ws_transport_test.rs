use super::*;
use crate::config::{PageGlobals, PageOrigin, ScreenConfig};
use crate::state::connection::{ConnectionManager, ConnectionPhase};
use crate::test_support::{FakeBrowser, ManualScheduler, MemoryProjector, RecordingTransport};
use crate::ui::projector::{CONNECT_BUTTON, CONNECTION_STATUS_TRUE};

// =============================================================
// Handshake classification
// =============================================================

#[test]
fn open_socket_reports_open_only() {
    let handshake = Handshake::from_ready_state(READY_STATE_OPEN);
    assert_eq!(handshake, Handshake::Open);
    assert_eq!(handshake.opening_events(), vec![TransportEvent::Open]);
}

#[test]
fn socket_closed_before_open_reports_error_then_close() {
    let handshake = Handshake::from_ready_state(READY_STATE_CLOSED);
    assert_eq!(handshake, Handshake::Refused);

    let events = handshake.opening_events();
    assert!(!events.contains(&TransportEvent::Open));
    assert!(matches!(events.as_slice(), [TransportEvent::Error(_), TransportEvent::Close]));
}

#[test]
fn closing_or_still_connecting_is_not_open() {
    assert_eq!(Handshake::from_ready_state(READY_STATE_CLOSING), Handshake::Refused);
    assert_eq!(Handshake::from_ready_state(READY_STATE_CONNECTING), Handshake::Refused);
}

// =============================================================
// Refused retries against the screen manager
// =============================================================

#[test]
fn refused_retry_keeps_the_running_reconnect_interval() {
    let globals = PageGlobals { screen_id: Some("3".to_owned()), ..PageGlobals::default() };
    let config = ScreenConfig::resolve(&globals, &PageOrigin::from_location("http:", "server:8000")).expect("config");
    let mut m = ConnectionManager::new(
        config,
        RecordingTransport::default(),
        ManualScheduler::default(),
        MemoryProjector::default(),
        FakeBrowser::default(),
    );
    m.start();
    let first = m.current_attempt().expect("attempt");
    m.handle_event(first, TransportEvent::Close);
    let interval = m.reconnect_timer().expect("interval");

    m.on_timer(interval);
    let retry = m.current_attempt().expect("retry attempt");
    assert_ne!(retry, first);
    for event in Handshake::from_ready_state(READY_STATE_CLOSED).opening_events() {
        m.handle_event(retry, event);
    }

    assert_eq!(m.phase(), ConnectionPhase::Disconnected);
    assert!(!m.is_connecting());
    assert_eq!(m.reconnect_timer(), Some(interval));
    assert_eq!(m.scheduler().active_intervals(), vec![interval]);
    assert!(m.scheduler().cancelled.is_empty());
    assert_eq!(m.projector().is_visible(CONNECTION_STATUS_TRUE), Some(false));
    assert_eq!(m.projector().is_visible(CONNECT_BUTTON), Some(true));
}
