use super::*;
use crate::test_support::{FakeBrowser, MemoryProjector};

const FALLBACK: &str = "http://server/default/3";

#[test]
fn reload_opens_requested_url_in_named_window() {
    let mut controller = ContentWindowController::new(FALLBACK);
    let mut browser = FakeBrowser::default();
    let mut projector = MemoryProjector::default();

    controller.reload(Some("http://server/video/intro.mp4"), &mut browser, &mut projector);

    assert_eq!(
        browser.opened,
        vec![(1, "http://server/video/intro.mp4".to_owned(), CONTENT_WINDOW_TARGET.to_owned())]
    );
    assert_eq!(projector.text_of(CONTENT_URL), Some("http://server/video/intro.mp4"));
    assert_eq!(controller.current_url(), Some("http://server/video/intro.mp4"));
    assert_eq!(controller.window(), Some(&1));
}

#[test]
fn reload_falls_back_when_url_missing_or_blank() {
    let mut controller = ContentWindowController::new(FALLBACK);
    let mut browser = FakeBrowser::default();
    let mut projector = MemoryProjector::default();

    controller.reload(None, &mut browser, &mut projector);
    assert_eq!(controller.current_url(), Some(FALLBACK));

    controller.reload(Some("   "), &mut browser, &mut projector);
    assert_eq!(browser.opened.last().map(|(_, url, _)| url.as_str()), Some(FALLBACK));
    assert_eq!(projector.text_of(CONTENT_URL), Some(FALLBACK));
}

#[test]
fn reload_closes_previous_window() {
    let mut controller = ContentWindowController::new(FALLBACK);
    let mut browser = FakeBrowser::default();
    let mut projector = MemoryProjector::default();

    controller.reload(Some("http://a"), &mut browser, &mut projector);
    controller.reload(Some("http://b"), &mut browser, &mut projector);

    assert_eq!(browser.closed, vec![1]);
    assert_eq!(controller.window(), Some(&2));
}

#[test]
fn reload_skips_closing_window_the_user_already_closed() {
    let mut controller = ContentWindowController::new(FALLBACK);
    let mut browser = FakeBrowser::default();
    let mut projector = MemoryProjector::default();

    controller.reload(Some("http://a"), &mut browser, &mut projector);
    browser.closed_by_user.insert(1);
    controller.reload(Some("http://b"), &mut browser, &mut projector);

    assert!(browser.closed.is_empty());
    assert_eq!(browser.opened.len(), 2);
}

#[test]
fn blocked_popup_leaves_no_handle_but_updates_label() {
    let mut controller = ContentWindowController::new(FALLBACK);
    let mut browser = FakeBrowser::blocking_popups();
    let mut projector = MemoryProjector::default();

    controller.reload(Some("http://a"), &mut browser, &mut projector);

    assert!(controller.window().is_none());
    assert_eq!(projector.text_of(CONTENT_URL), Some("http://a"));
}
