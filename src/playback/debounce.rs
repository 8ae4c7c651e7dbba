use std::time::Duration;

use crate::playback::schedule::{Scheduler, TaskId, TaskKind};

/// Collapses bursts of edits into one redraw after a quiet window.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TaskId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an edit: the previously scheduled redraw is cancelled and a new one armed.
    pub fn touch(&mut self, sched: &mut dyn Scheduler) -> TaskId {
        self.cancel(sched);
        let id = sched.schedule_once(TaskKind::CurveRedraw, self.delay);
        self.pending = Some(id);
        id
    }

    /// Whether a fired task is the pending redraw. Consumes it when it is.
    pub fn fire(&mut self, id: TaskId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, sched: &mut dyn Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/debounce.rs"]
mod tests;
