//! Page configuration for the screen and status-board entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders each page with a handful of script globals
//! (`ws_url`, `content_url`, ...) before this crate runs. They are read once
//! into [`PageGlobals`] and resolved against the page origin into typed
//! configs, so the state machines never touch `window` themselves.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::ClientError;
use crate::net::types::ScreenContent;

/// Fixed period of the screen reconnect timer.
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(5000);
/// Delay before the status board reloads itself after losing its channel.
pub const STATUS_RELOAD_DELAY: Duration = Duration::from_millis(5000);
/// Delay between start-up and the one-shot content window open.
pub const CONTENT_WINDOW_DELAY: Duration = Duration::from_millis(1000);
/// Browsing-context name the content window is opened under.
pub const CONTENT_WINDOW_TARGET: &str = "contentWindow";
/// Endpoint path of the shared screen-status broadcast channel.
pub const STATUS_BROADCAST_PATH: &str = "/ws-screen-status";
/// Used when neither a content URL nor a screen id is available.
pub const BLANK_CONTENT_URL: &str = "about:blank";

/// Endpoint path of one screen's control channel.
pub fn screen_socket_path(screen_id: &str) -> String {
    format!("/ws/{screen_id}")
}

/// Security context and host of the page that loaded the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageOrigin {
    /// True when the page was served over `https:`.
    pub secure: bool,
    /// `host[:port]` of the page.
    pub host: String,
}

impl PageOrigin {
    /// Build from `location.protocol` and `location.host`.
    pub fn from_location(protocol: &str, host: &str) -> Self {
        Self { secure: protocol == "https:", host: host.to_owned() }
    }

    /// Read the origin of the current page.
    #[cfg(feature = "hydrate")]
    pub fn from_window(window: &web_sys::Window) -> Result<Self, ClientError> {
        let location = window.location();
        let protocol = location.protocol().map_err(|e| ClientError::from_js(&e))?;
        let host = location.host().map_err(|e| ClientError::from_js(&e))?;
        Ok(Self::from_location(&protocol, &host))
    }

    /// Socket URL for `path`: `wss` on secure pages, `ws` otherwise.
    pub fn ws_endpoint(&self, path: &str) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}{path}", self.host)
    }

    /// HTTP base URL with a trailing slash.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}/", self.host)
    }
}

/// Raw script globals injected by the server-rendered page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageGlobals {
    pub ws_url: Option<String>,
    pub content_url: Option<String>,
    pub default_content_url: Option<String>,
    pub screen_id: Option<String>,
    pub video_url: Option<String>,
}

impl PageGlobals {
    /// Read the known globals off `window`. Numeric values are stringified;
    /// empty strings count as unset.
    #[cfg(feature = "hydrate")]
    pub fn from_window(window: &web_sys::Window) -> Self {
        Self {
            ws_url: read_global(window, "ws_url"),
            content_url: read_global(window, "content_url"),
            default_content_url: read_global(window, "default_content_url"),
            screen_id: read_global(window, "screen_id"),
            video_url: read_global(window, "videoUrl"),
        }
    }
}

#[cfg(feature = "hydrate")]
fn read_global(window: &web_sys::Window, name: &str) -> Option<String> {
    let value = js_sys::Reflect::get(window, &wasm_bindgen::JsValue::from_str(name)).ok()?;
    let text = value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))?;
    non_empty(Some(&text)).map(ToOwned::to_owned)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolved configuration of a screen page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Socket URL of this screen's control channel.
    pub ws_url: String,
    /// Content URL injected by the server, if any.
    pub content_url: Option<String>,
    /// URL shown when no content URL is configured.
    pub fallback_content_url: String,
    /// HTTP base of the page origin, used to resolve pushed content.
    pub base_url: String,
    /// Screen id, when the page exposes it.
    pub screen_id: Option<String>,
    pub reconnect_interval: Duration,
    pub content_window_delay: Duration,
}

impl ScreenConfig {
    /// Resolve page globals against the page origin.
    ///
    /// `ws_url` wins when present; otherwise the socket URL is derived from
    /// `screen_id`. One of the two is required.
    pub fn resolve(globals: &PageGlobals, origin: &PageOrigin) -> Result<Self, ClientError> {
        let screen_id = non_empty(globals.screen_id.as_deref()).map(ToOwned::to_owned);
        let ws_url = match (non_empty(globals.ws_url.as_deref()), screen_id.as_deref()) {
            (Some(url), _) => url.to_owned(),
            (None, Some(id)) => origin.ws_endpoint(&screen_socket_path(id)),
            (None, None) => return Err(ClientError::MissingGlobal { name: "ws_url" }),
        };

        let base_url = origin.base_url();
        let fallback_content_url = non_empty(globals.default_content_url.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| screen_id.as_deref().map(|id| ScreenContent::default_url(&base_url, id)))
            .unwrap_or_else(|| BLANK_CONTENT_URL.to_owned());

        Ok(Self {
            ws_url,
            content_url: non_empty(globals.content_url.as_deref()).map(ToOwned::to_owned),
            fallback_content_url,
            base_url,
            screen_id,
            reconnect_interval: RECONNECT_INTERVAL,
            content_window_delay: CONTENT_WINDOW_DELAY,
        })
    }

    /// Resolve from the current page.
    #[cfg(feature = "hydrate")]
    pub fn from_page() -> Result<Self, ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::Browser("no window".to_owned()))?;
        let origin = PageOrigin::from_window(&window)?;
        Self::resolve(&PageGlobals::from_window(&window), &origin)
    }
}

/// Resolved configuration of the operator status board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBoardConfig {
    /// Socket URL of the broadcast channel.
    pub ws_url: String,
    pub reload_delay: Duration,
}

impl StatusBoardConfig {
    pub fn for_origin(origin: &PageOrigin) -> Self {
        Self { ws_url: origin.ws_endpoint(STATUS_BROADCAST_PATH), reload_delay: STATUS_RELOAD_DELAY }
    }

    /// Resolve from the current page.
    #[cfg(feature = "hydrate")]
    pub fn from_page() -> Result<Self, ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::Browser("no window".to_owned()))?;
        Ok(Self::for_origin(&PageOrigin::from_window(&window)?))
    }
}
