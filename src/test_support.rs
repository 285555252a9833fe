//! In-memory collaborators for state-machine tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use crate::error::ClientError;
use crate::net::transport::{AttemptId, Transport};
use crate::ui::browser::BrowserContext;
use crate::ui::projector::UiProjector;
use crate::util::scheduler::{Scheduler, TaskId};

/// Records every open/detach; optionally refuses the next open.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub opened: Vec<(String, AttemptId)>,
    pub detached: Vec<AttemptId>,
    pub refuse_next_open: bool,
}

impl RecordingTransport {
    pub fn open_count(&self) -> usize {
        self.opened.len()
    }

    pub fn last_attempt(&self) -> AttemptId {
        self.opened.last().map(|(_, attempt)| *attempt).expect("an attempt was opened")
    }
}

impl Transport for RecordingTransport {
    fn open(&mut self, url: &str, attempt: AttemptId) -> Result<(), ClientError> {
        if std::mem::take(&mut self.refuse_next_open) {
            return Err(ClientError::Transport("refused".to_owned()));
        }
        self.opened.push((url.to_owned(), attempt));
        Ok(())
    }

    fn detach(&mut self, attempt: AttemptId) {
        self.detached.push(attempt);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Every(Duration),
    Once(Duration),
}

/// Scheduler whose tasks only fire when a test says so.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pub active: BTreeMap<TaskId, TaskKind>,
    pub cancelled: Vec<TaskId>,
}

impl ManualScheduler {
    fn insert(&mut self, kind: TaskKind) -> TaskId {
        self.next_id += 1;
        let id = TaskId::new(self.next_id);
        self.active.insert(id, kind);
        id
    }

    pub fn active_intervals(&self) -> Vec<TaskId> {
        self.active
            .iter()
            .filter(|(_, kind)| matches!(kind, TaskKind::Every(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn active_timeouts(&self) -> Vec<TaskId> {
        self.active
            .iter()
            .filter(|(_, kind)| matches!(kind, TaskKind::Once(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn kind(&self, task: TaskId) -> Option<TaskKind> {
        self.active.get(&task).copied()
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, period: Duration) -> TaskId {
        self.insert(TaskKind::Every(period))
    }

    fn once(&mut self, delay: Duration) -> TaskId {
        self.insert(TaskKind::Once(delay))
    }

    fn cancel(&mut self, task: TaskId) {
        if self.active.remove(&task).is_some() {
            self.cancelled.push(task);
        }
    }
}

/// Tracks visibility and text per element id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryProjector {
    pub visible: HashMap<String, bool>,
    pub text: HashMap<String, String>,
}

impl MemoryProjector {
    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.visible.get(id).copied()
    }

    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.text.get(id).map(String::as_str)
    }
}

impl UiProjector for MemoryProjector {
    fn show(&mut self, id: &str) {
        self.visible.insert(id.to_owned(), true);
    }

    fn hide(&mut self, id: &str) {
        self.visible.insert(id.to_owned(), false);
    }

    fn set_text(&mut self, id: &str, value: &str) {
        self.text.insert(id.to_owned(), value.to_owned());
    }
}

/// Browser double: numbered windows and a reload counter.
#[derive(Debug, Default)]
pub struct FakeBrowser {
    pub reloads: usize,
    pub opened: Vec<(u32, String, String)>,
    pub closed: Vec<u32>,
    pub closed_by_user: HashSet<u32>,
    pub block_popups: bool,
    next_window: u32,
}

impl FakeBrowser {
    /// A browser whose popup blocker refuses every `open_window`.
    pub fn blocking_popups() -> Self {
        Self { block_popups: true, ..Self::default() }
    }
}

impl BrowserContext for FakeBrowser {
    type Window = u32;

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn open_window(&mut self, url: &str, target: &str) -> Option<u32> {
        if self.block_popups {
            return None;
        }
        self.next_window += 1;
        self.opened.push((self.next_window, url.to_owned(), target.to_owned()));
        Some(self.next_window)
    }

    fn close_window(&mut self, window: &u32) {
        self.closed.push(*window);
    }

    fn is_window_closed(&self, window: &u32) -> bool {
        self.closed.contains(window) || self.closed_by_user.contains(window)
    }
}
