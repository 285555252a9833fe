use super::*;

const BASE: &str = "http://192.168.2.65:8000/";

// =============================================================
// ScreenContent
// =============================================================

#[test]
fn content_url_resolves_each_kind() {
    let mut content = ScreenContent {
        kind: ContentKind::Text,
        text: "welcome".to_owned(),
        url: "https://news.example.com".to_owned(),
        video: "intro.mp4".to_owned(),
        picture: "menu.png".to_owned(),
    };
    assert_eq!(content.content_url(BASE, "3"), "http://192.168.2.65:8000/responsive/welcome");

    content.kind = ContentKind::Url;
    assert_eq!(content.content_url(BASE, "3"), "https://news.example.com");

    content.kind = ContentKind::Video;
    assert_eq!(content.content_url(BASE, "3"), "http://192.168.2.65:8000/video/intro.mp4");

    content.kind = ContentKind::Picture;
    assert_eq!(content.content_url(BASE, "3"), "http://192.168.2.65:8000/picture/menu.png");

    content.kind = ContentKind::Default;
    assert_eq!(content.content_url(BASE, "3"), "http://192.168.2.65:8000/default/3");
}

#[test]
fn screen_content_fields_default_when_absent() {
    let content: ScreenContent = serde_json::from_str(r#"{"type":"video","video":"loop.mp4"}"#).expect("content");
    assert_eq!(content.kind, ContentKind::Video);
    assert_eq!(content.video, "loop.mp4");
    assert!(content.text.is_empty());
}

// =============================================================
// ScreenMessage
// =============================================================

#[test]
fn any_payload_is_content_changed() {
    assert_eq!(ScreenMessage::from_payload("reload"), ScreenMessage::ContentChanged { content: None });
    assert_eq!(ScreenMessage::from_payload(""), ScreenMessage::ContentChanged { content: None });
}

#[test]
fn server_screen_payload_is_decoded() {
    let payload = r#"{"type":"url","text":"","url":"https://example.com","video":"","picture":""}"#;
    let ScreenMessage::ContentChanged { content } = ScreenMessage::from_payload(payload);
    let content = content.expect("decoded content");
    assert_eq!(content.kind, ContentKind::Url);
    assert_eq!(content.url, "https://example.com");
}

#[test]
fn unknown_content_type_still_means_content_changed() {
    let ScreenMessage::ContentChanged { content } = ScreenMessage::from_payload(r#"{"type":"hologram"}"#);
    assert!(content.is_none());
}

// =============================================================
// StatusEvent
// =============================================================

#[test]
fn parse_status_update_with_string_id() {
    let event = StatusEvent::parse(r#"{"type":"screen_status_update","screen_id":"42","connected":false}"#)
        .expect("valid payload");
    assert_eq!(
        event,
        Some(StatusEvent::ScreenStatusUpdate(ScreenStatusUpdate { screen_id: "42".to_owned(), connected: false }))
    );
}

#[test]
fn parse_status_update_with_integer_id() {
    let event = StatusEvent::parse(r#"{"type":"screen_status_update","screen_id":7,"connected":true}"#)
        .expect("valid payload");
    assert_eq!(
        event,
        Some(StatusEvent::ScreenStatusUpdate(ScreenStatusUpdate { screen_id: "7".to_owned(), connected: true }))
    );
}

#[test]
fn parse_ignores_unknown_event_types() {
    let event = StatusEvent::parse(r#"{"type":"screen_renamed","screen_id":"1","name":"Lobby"}"#).expect("valid");
    assert!(event.is_none());
}

#[test]
fn parse_rejects_malformed_payloads() {
    assert!(StatusEvent::parse("not json").is_err());
    assert!(StatusEvent::parse(r#"{"screen_id":"1","connected":true}"#).is_err());
    assert!(StatusEvent::parse(r#"{"type":"screen_status_update","screen_id":"1"}"#).is_err());
    assert!(StatusEvent::parse(r#"{"type":"screen_status_update","screen_id":1.5,"connected":true}"#).is_err());
}
