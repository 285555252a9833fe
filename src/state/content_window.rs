//! Auxiliary window that renders the screen's assigned content.
//!
//! Not a state machine: one window handle, replaced wholesale on every
//! reload. The screen manager triggers it once shortly after start-up and
//! it is unaffected by reconnects.

#[cfg(test)]
#[path = "content_window_test.rs"]
mod content_window_test;

use crate::config::CONTENT_WINDOW_TARGET;
use crate::ui::browser::BrowserContext;
use crate::ui::projector::{CONTENT_URL, UiProjector};

/// Owns the handle of the content window, if one is open.
#[derive(Debug)]
pub struct ContentWindowController<W> {
    fallback_url: String,
    window: Option<W>,
    current_url: Option<String>,
}

impl<W> ContentWindowController<W> {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self { fallback_url: fallback_url.into(), window: None, current_url: None }
    }

    /// URL of the most recent reload, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    /// Point the content window at `url` (or the fallback when `url` is
    /// absent or blank), closing the previous window first.
    pub fn reload<B, P>(&mut self, url: Option<&str>, browser: &mut B, projector: &mut P)
    where
        B: BrowserContext<Window = W>,
        P: UiProjector,
    {
        let chosen = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.fallback_url.as_str())
            .to_owned();
        log::info!("reloading content window with {chosen}");

        projector.set_text(CONTENT_URL, &chosen);

        if let Some(previous) = self.window.take() {
            if !browser.is_window_closed(&previous) {
                browser.close_window(&previous);
            }
        }

        self.window = browser.open_window(&chosen, CONTENT_WINDOW_TARGET);
        if self.window.is_none() {
            log::warn!("browser refused to open content window for {chosen}");
        }
        self.current_url = Some(chosen);
    }
}
