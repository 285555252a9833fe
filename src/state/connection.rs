//! Connection lifecycle of one screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! A screen page keeps exactly one channel open to the server. The server
//! pushes a message whenever the screen's assignment changes, and the page
//! answers by reloading itself. This module owns that channel, the reconnect
//! timer, the connection-status affordances on the page, and the content
//! window.
//!
//! STATE MACHINE
//! =============
//! `Disconnected --connect()--> Connecting --open--> Connected --close--> Disconnected`
//!
//! `connect()` is gated by the `connecting` flag, so a reconnect tick that
//! races an in-flight attempt is a no-op. The first `close` starts a fixed
//! 5 s reconnect interval; only a successful `open` cancels it, so at most
//! one interval exists at a time. `error` clears `connecting` but leaves
//! the phase alone; the transport reports `close` after it.
//!
//! Retries never stop and never back off.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use crate::config::ScreenConfig;
use crate::net::transport::{AttemptId, Transport, TransportEvent};
use crate::net::types::ScreenMessage;
use crate::state::content_window::ContentWindowController;
use crate::ui::browser::BrowserContext;
use crate::ui::projector::{
    CONNECT_BUTTON, CONNECTION_STATUS_FALSE, CONNECTION_STATUS_TRUE, UPDATE_BUTTON, UiProjector,
};
use crate::util::scheduler::{Scheduler, TaskId};

/// Lifecycle phase of the screen's channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// No channel; the reconnect timer may be running.
    #[default]
    Disconnected,
    /// An attempt was issued and has not reported `open` or `close` yet.
    Connecting,
    /// The channel is open.
    Connected,
}

/// Owns one screen's channel, reconnect timer and content window.
pub struct ConnectionManager<T, S, P, B>
where
    B: BrowserContext,
{
    config: ScreenConfig,
    transport: T,
    scheduler: S,
    projector: P,
    browser: B,
    content_window: ContentWindowController<B::Window>,
    phase: ConnectionPhase,
    /// True between issuing an attempt and its first `open`, `close` or `error`.
    connecting: bool,
    /// Attempt whose events are accepted; older attempts are detached.
    attempt: Option<AttemptId>,
    last_issued: Option<AttemptId>,
    reconnect_timer: Option<TaskId>,
    content_timer: Option<TaskId>,
}

impl<T, S, P, B> ConnectionManager<T, S, P, B>
where
    T: Transport,
    S: Scheduler,
    P: UiProjector,
    B: BrowserContext,
{
    pub fn new(config: ScreenConfig, transport: T, scheduler: S, projector: P, browser: B) -> Self {
        let content_window = ContentWindowController::new(config.fallback_content_url.clone());
        Self {
            config,
            transport,
            scheduler,
            projector,
            browser,
            content_window,
            phase: ConnectionPhase::Disconnected,
            connecting: false,
            attempt: None,
            last_issued: None,
            reconnect_timer: None,
            content_timer: None,
        }
    }

    /// Issue the first connection attempt and schedule the content window.
    pub fn start(&mut self) {
        self.connect();
        if self.content_timer.is_none() {
            self.content_timer = Some(self.scheduler.once(self.config.content_window_delay));
        }
    }

    /// Open a fresh channel, replacing any previous one.
    ///
    /// Returns `false` without side effects while an attempt is in flight.
    pub fn connect(&mut self) -> bool {
        if self.connecting {
            log::debug!("connect ignored: attempt {:?} still in flight", self.attempt);
            return false;
        }
        self.connecting = true;
        self.phase = ConnectionPhase::Connecting;

        if let Some(previous) = self.attempt.take() {
            self.transport.detach(previous);
        }
        let attempt = self.last_issued.map_or(AttemptId::FIRST, AttemptId::next);
        self.last_issued = Some(attempt);
        self.attempt = Some(attempt);

        log::info!("connecting to {} (attempt {attempt})", self.config.ws_url);
        if let Err(err) = self.transport.open(&self.config.ws_url, attempt) {
            self.handle_event(attempt, TransportEvent::Error(err.to_string()));
            self.handle_event(attempt, TransportEvent::Close);
        }
        true
    }

    /// Apply a transport event. Events from detached attempts are dropped.
    pub fn handle_event(&mut self, attempt: AttemptId, event: TransportEvent) {
        if self.attempt != Some(attempt) {
            log::debug!("dropping {event:?} from detached attempt {attempt}");
            return;
        }
        match event {
            TransportEvent::Open => self.on_open(),
            TransportEvent::Message(payload) => self.on_message(&payload),
            TransportEvent::Close => self.on_close(),
            TransportEvent::Error(reason) => self.on_error(&reason),
        }
    }

    /// Route a scheduler tick to the task that owns it.
    pub fn on_timer(&mut self, task: TaskId) {
        if self.reconnect_timer == Some(task) {
            self.on_reconnect_tick();
        } else if self.content_timer == Some(task) {
            self.content_timer = None;
            self.scheduler.cancel(task);
            let url = self.config.content_url.clone();
            self.reload_content_window(url.as_deref());
        } else {
            log::debug!("ignoring tick of stale timer {task:?}");
        }
    }

    /// Point the content window at `url`, or the configured fallback.
    pub fn reload_content_window(&mut self, url: Option<&str>) {
        self.content_window.reload(url, &mut self.browser, &mut self.projector);
    }

    /// Cancel timers and detach the live channel without reporting a close.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.reconnect_timer.take() {
            self.scheduler.cancel(task);
        }
        if let Some(task) = self.content_timer.take() {
            self.scheduler.cancel(task);
        }
        if let Some(attempt) = self.attempt.take() {
            self.transport.detach(attempt);
        }
        self.connecting = false;
        self.phase = ConnectionPhase::Disconnected;
        log::info!("screen connection shut down");
    }

    fn on_open(&mut self) {
        log::info!("connected to {}", self.config.ws_url);
        self.phase = ConnectionPhase::Connected;
        self.connecting = false;

        self.projector.show(CONNECTION_STATUS_TRUE);
        self.projector.hide(CONNECTION_STATUS_FALSE);
        self.projector.hide(CONNECT_BUTTON);
        self.projector.show(UPDATE_BUTTON);

        if let Some(task) = self.reconnect_timer.take() {
            self.scheduler.cancel(task);
        }
    }

    fn on_message(&mut self, payload: &str) {
        match ScreenMessage::from_payload(payload) {
            ScreenMessage::ContentChanged { content } => {
                match (content, self.config.screen_id.as_deref()) {
                    (Some(content), Some(screen_id)) => log::info!(
                        "screen content changed to {}, reloading",
                        content.content_url(&self.config.base_url, screen_id)
                    ),
                    (Some(content), None) => log::info!("screen content changed to {:?}, reloading", content.kind),
                    (None, _) => log::info!("screen content changed, reloading"),
                }
                self.browser.reload();
            }
        }
    }

    fn on_close(&mut self) {
        log::warn!("disconnected from {}", self.config.ws_url);
        self.phase = ConnectionPhase::Disconnected;
        self.connecting = false;

        self.projector.show(CONNECTION_STATUS_FALSE);
        self.projector.hide(CONNECTION_STATUS_TRUE);
        self.projector.show(CONNECT_BUTTON);
        self.projector.hide(UPDATE_BUTTON);

        if self.reconnect_timer.is_none() {
            self.reconnect_timer = Some(self.scheduler.every(self.config.reconnect_interval));
        }
    }

    fn on_error(&mut self, reason: &str) {
        log::warn!("screen connection error: {reason}");
        self.connecting = false;
    }

    fn on_reconnect_tick(&mut self) {
        if self.phase == ConnectionPhase::Connected || self.connecting {
            return;
        }
        log::info!("attempting to reconnect");
        self.connect();
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn is_connected(&self) -> bool {
        self.phase == ConnectionPhase::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    /// Attempt whose events are currently accepted.
    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.attempt
    }

    pub fn reconnect_timer(&self) -> Option<TaskId> {
        self.reconnect_timer
    }

    pub fn content_timer(&self) -> Option<TaskId> {
        self.content_timer
    }

    pub fn content_window(&self) -> &ContentWindowController<B::Window> {
        &self.content_window
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }
}
