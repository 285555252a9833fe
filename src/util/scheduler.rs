//! Cancellable timers for the state machines.
//!
//! The state machines own the [`TaskId`]s they start and receive ticks
//! through their `on_timer` method. In the browser, [`BrowserScheduler`]
//! backs each task with a `gloo-timers` handle; dropping the handle clears
//! the JS timer, so cancelling is just removing it from the table.

use std::time::Duration;

/// Handle of one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Source of periodic and one-shot timers.
pub trait Scheduler {
    /// Fire every `period` until cancelled.
    fn every(&mut self, period: Duration) -> TaskId;
    /// Fire once after `delay`. The task stays registered after firing
    /// until its owner cancels it.
    fn once(&mut self, delay: Duration) -> TaskId;
    /// Stop `task`. Unknown or already-finished tasks are ignored.
    fn cancel(&mut self, task: TaskId);
}

#[cfg(feature = "hydrate")]
pub use self::browser::{BrowserScheduler, TimerSink};

#[cfg(feature = "hydrate")]
mod browser {
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::Duration;

    use gloo_timers::callback::{Interval, Timeout};

    use super::{Scheduler, TaskId};

    /// Callback invoked with the id of a task when it fires.
    pub type TimerSink = Rc<dyn Fn(TaskId)>;

    enum ScheduledTask {
        // Held only so dropping the entry clears the JS timer.
        Interval(#[allow(dead_code)] Interval),
        Timeout(#[allow(dead_code)] Timeout),
    }

    /// Scheduler backed by `setInterval`/`setTimeout`.
    pub struct BrowserScheduler {
        on_fire: TimerSink,
        next_id: u64,
        tasks: HashMap<TaskId, ScheduledTask>,
    }

    impl BrowserScheduler {
        pub fn new(on_fire: TimerSink) -> Self {
            Self { on_fire, next_id: 0, tasks: HashMap::new() }
        }

        fn allocate(&mut self) -> TaskId {
            self.next_id += 1;
            TaskId::new(self.next_id)
        }
    }

    fn millis(duration: Duration) -> u32 {
        u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
    }

    impl Scheduler for BrowserScheduler {
        fn every(&mut self, period: Duration) -> TaskId {
            let id = self.allocate();
            let fire = Rc::clone(&self.on_fire);
            let interval = Interval::new(millis(period), move || fire(id));
            self.tasks.insert(id, ScheduledTask::Interval(interval));
            id
        }

        fn once(&mut self, delay: Duration) -> TaskId {
            let id = self.allocate();
            let fire = Rc::clone(&self.on_fire);
            let timeout = Timeout::new(millis(delay), move || fire(id));
            self.tasks.insert(id, ScheduledTask::Timeout(timeout));
            id
        }

        fn cancel(&mut self, task: TaskId) {
            if self.tasks.remove(&task).is_none() {
                log::debug!("cancel of unknown timer task {task:?}");
            }
        }
    }
}
