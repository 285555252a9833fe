//! `web-sys` implementations of the page-facing interfaces.
//!
//! Requires a browser environment; compiled only with `hydrate`.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::browser::BrowserContext;
use super::projector::UiProjector;

/// Class the page stylesheet uses to hide elements.
const HIDDEN_CLASS: &str = "hidden";

/// Projects visibility and text onto elements of the current document.
///
/// Elements are hidden both through the `hidden` class and an inline
/// `display: none`, since the server templates use either.
#[derive(Clone, Debug, Default)]
pub struct DomProjector {
    document: Option<Document>,
}

impl DomProjector {
    pub fn new() -> Self {
        Self { document: web_sys::window().and_then(|w| w.document()) }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        let element = self.document.as_ref()?.get_element_by_id(id);
        if element.is_none() {
            log::debug!("no element #{id} on this page");
        }
        element?.dyn_into::<HtmlElement>().ok()
    }
}

impl UiProjector for DomProjector {
    fn show(&mut self, id: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().remove_1(HIDDEN_CLASS);
            let style = el.style();
            if style.get_property_value("display").is_ok_and(|v| v == "none") {
                let _ = style.remove_property("display");
            }
        }
    }

    fn hide(&mut self, id: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().add_1(HIDDEN_CLASS);
            let _ = el.style().set_property("display", "none");
        }
    }

    fn set_text(&mut self, id: &str, value: &str) {
        if let Some(el) = self.element(id) {
            el.set_inner_text(value);
        }
    }
}

/// The current window: reloads and popup windows.
#[derive(Clone, Debug, Default)]
pub struct WindowBrowser {
    window: Option<web_sys::Window>,
}

impl WindowBrowser {
    pub fn new() -> Self {
        Self { window: web_sys::window() }
    }
}

impl BrowserContext for WindowBrowser {
    type Window = web_sys::Window;

    fn reload(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if let Err(err) = window.location().reload() {
            log::warn!("page reload failed: {err:?}");
        }
    }

    fn open_window(&mut self, url: &str, target: &str) -> Option<web_sys::Window> {
        match self.window.as_ref()?.open_with_url_and_target(url, target) {
            Ok(opened) => opened,
            Err(err) => {
                log::warn!("window.open({url}) failed: {err:?}");
                None
            }
        }
    }

    fn close_window(&mut self, window: &web_sys::Window) {
        if let Err(err) = window.close() {
            log::debug!("closing content window failed: {err:?}");
        }
    }

    fn is_window_closed(&self, window: &web_sys::Window) -> bool {
        window.closed().unwrap_or(true)
    }
}
