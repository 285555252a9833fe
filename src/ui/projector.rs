//! Element-level view of the page the state machines drive.
//!
//! DESIGN
//! ======
//! The state machines never look up elements themselves. They name an
//! element id and ask for it to be shown, hidden or relabelled; a missing
//! element is the projector's problem, not a state-machine error.

#[cfg(test)]
#[path = "projector_test.rs"]
mod projector_test;

/// Shown while the screen's channel is open.
pub const CONNECTION_STATUS_TRUE: &str = "connection_status_true";
/// Shown while the screen's channel is closed.
pub const CONNECTION_STATUS_FALSE: &str = "connection_status_false";
/// Manual reconnect control, offered only while disconnected.
pub const CONNECT_BUTTON: &str = "connect_button";
/// Content update control, offered only while connected.
pub const UPDATE_BUTTON: &str = "update_button";
/// Label showing the content window's current URL.
pub const CONTENT_URL: &str = "content_url";
/// Container of the embedded video player.
pub const PLAYER: &str = "player";

/// Dashboard indicator that `screen_id` is offline.
pub fn screen_not_connected(screen_id: &str) -> String {
    format!("screen_not_connected_{screen_id}")
}

/// Dashboard row section holding `screen_id`'s update controls.
pub fn update_screen_section(screen_id: &str) -> String {
    format!("update_screen_section_{screen_id}")
}

/// Dashboard update button wrapper of `screen_id`.
pub fn update_section(screen_id: &str) -> String {
    format!("update_section_{screen_id}")
}

/// Visible-surface capability set: toggle and relabel elements by id.
pub trait UiProjector {
    fn show(&mut self, id: &str);
    fn hide(&mut self, id: &str);
    fn set_text(&mut self, id: &str, value: &str);
}
