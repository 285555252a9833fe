//! Browsing-context operations the state machines need beyond the DOM.

/// Page navigation and auxiliary windows.
pub trait BrowserContext {
    /// Handle of a window opened by [`BrowserContext::open_window`].
    type Window;

    /// Reload the current page, discarding all in-memory state.
    fn reload(&mut self);

    /// Open `url` in the browsing context named `target`. `None` when the
    /// browser refused, e.g. a blocked popup.
    fn open_window(&mut self, url: &str, target: &str) -> Option<Self::Window>;

    fn close_window(&mut self, window: &Self::Window);

    fn is_window_closed(&self, window: &Self::Window) -> bool;
}
