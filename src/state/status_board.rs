//! Operator dashboard listener for screen connection broadcasts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard renders one row per known screen. The server fans out a
//! `screen_status_update` whenever a screen connects or drops, and this
//! listener flips that row's indicators. It never talks to screens itself.
//!
//! RECOVERY
//! ========
//! The listener keeps nothing worth saving across a drop, so losing the
//! channel schedules one page reload after a fixed delay instead of a
//! reconnect loop.

#[cfg(test)]
#[path = "status_board_test.rs"]
mod status_board_test;

use std::collections::BTreeMap;

use crate::config::StatusBoardConfig;
use crate::net::transport::{AttemptId, Transport, TransportEvent};
use crate::net::types::{ScreenStatusUpdate, StatusEvent};
use crate::ui::browser::BrowserContext;
use crate::ui::projector::{UiProjector, screen_not_connected, update_screen_section, update_section};
use crate::util::scheduler::{Scheduler, TaskId};

/// Push-only observer of the screen-status broadcast channel.
pub struct StatusBroadcastListener<T, S, P, B> {
    config: StatusBoardConfig,
    transport: T,
    scheduler: S,
    projector: P,
    browser: B,
    attempt: Option<AttemptId>,
    reload_timer: Option<TaskId>,
    /// Last known flag per screen id.
    screens: BTreeMap<String, bool>,
}

impl<T, S, P, B> StatusBroadcastListener<T, S, P, B>
where
    T: Transport,
    S: Scheduler,
    P: UiProjector,
    B: BrowserContext,
{
    pub fn new(config: StatusBoardConfig, transport: T, scheduler: S, projector: P, browser: B) -> Self {
        Self {
            config,
            transport,
            scheduler,
            projector,
            browser,
            attempt: None,
            reload_timer: None,
            screens: BTreeMap::new(),
        }
    }

    /// Open the broadcast channel. Later calls are ignored.
    pub fn start(&mut self) {
        if self.attempt.is_some() {
            return;
        }
        let attempt = AttemptId::FIRST;
        self.attempt = Some(attempt);
        log::info!("listening for screen status on {}", self.config.ws_url);
        if let Err(err) = self.transport.open(&self.config.ws_url, attempt) {
            self.handle_event(attempt, TransportEvent::Error(err.to_string()));
            self.handle_event(attempt, TransportEvent::Close);
        }
    }

    pub fn handle_event(&mut self, attempt: AttemptId, event: TransportEvent) {
        if self.attempt != Some(attempt) {
            log::debug!("dropping {event:?} from unknown attempt {attempt}");
            return;
        }
        match event {
            TransportEvent::Open => log::info!("connected to screen status channel"),
            TransportEvent::Message(payload) => self.on_message(&payload),
            TransportEvent::Close => self.on_close(),
            TransportEvent::Error(reason) => log::warn!("screen status channel error: {reason}"),
        }
    }

    pub fn on_timer(&mut self, task: TaskId) {
        if self.reload_timer == Some(task) {
            self.scheduler.cancel(task);
            log::info!("reloading status board");
            self.browser.reload();
        }
    }

    /// Record `update` and project it onto the screen's row.
    pub fn apply_update(&mut self, update: &ScreenStatusUpdate) {
        let id = update.screen_id.as_str();
        if update.connected {
            self.projector.hide(&screen_not_connected(id));
            self.projector.show(&update_screen_section(id));
            self.projector.show(&update_section(id));
        } else {
            self.projector.show(&screen_not_connected(id));
            self.projector.hide(&update_screen_section(id));
        }
        self.screens.insert(update.screen_id.clone(), update.connected);
    }

    fn on_message(&mut self, payload: &str) {
        match StatusEvent::parse(payload) {
            Ok(Some(StatusEvent::ScreenStatusUpdate(update))) => {
                log::debug!("screen {} connected={}", update.screen_id, update.connected);
                self.apply_update(&update);
            }
            Ok(None) => log::debug!("ignoring unrecognized status event"),
            Err(err) => log::debug!("ignoring malformed status payload: {err}"),
        }
    }

    fn on_close(&mut self) {
        log::warn!("disconnected from screen status channel");
        if self.reload_timer.is_none() {
            self.reload_timer = Some(self.scheduler.once(self.config.reload_delay));
        }
    }

    /// Last broadcast flag for `screen_id`, if one arrived this session.
    pub fn screen_connected(&self, screen_id: &str) -> Option<bool> {
        self.screens.get(screen_id).copied()
    }

    pub fn reload_timer(&self) -> Option<TaskId> {
        self.reload_timer
    }

    pub fn transport(&self) -> &T {
        &self.transport
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
