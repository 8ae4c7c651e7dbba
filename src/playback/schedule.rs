use std::time::Duration;

/// Handle for a scheduled task. Ids are never reused within one scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Autoplay advance.
    PlaybackTick,
    /// Debounced curve redraw after input edits.
    CurveRedraw,
}

/// A task that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub id: TaskId,
    pub kind: TaskKind,
    /// Scheduler time at which the task fired.
    pub at: Duration,
}

/// Cancellable timers.
///
/// Cancelling is always safe: an unknown or already finished id is ignored and reported as
/// `false`.
pub trait Scheduler {
    fn now(&self) -> Duration;
    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskId;
    fn schedule_once(&mut self, kind: TaskKind, delay: Duration) -> TaskId;
    fn cancel(&mut self, id: TaskId) -> bool;
}

#[derive(Clone, Debug)]
struct Scheduled {
    id: TaskId,
    kind: TaskKind,
    due: Duration,
    period: Option<Duration>,
}

/// Deterministic scheduler whose clock only moves when told to.
///
/// Tasks are handed out one at a time by [`pop_due`](Self::pop_due), earliest first and in
/// scheduling order on ties, so whatever a fired task cancels never fires afterwards.
#[derive(Clone, Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Scheduled>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Fire the earliest task due at or before `until`, moving the clock to its due time.
    ///
    /// Repeating tasks are re-armed one period later; one-shot tasks are removed.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let pos = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[pos];
        let fired = Fired {
            id: task.id,
            kind: task.kind,
            at: task.due,
        };
        self.now = self.now.max(task.due);
        match task.period {
            Some(period) => task.due += period,
            None => {
                self.tasks.remove(pos);
            }
        }
        tracing::trace!(id = fired.id.0, kind = ?fired.kind, at_ms = fired.at.as_millis() as u64, "task fired");
        Some(fired)
    }

    /// Move the clock forward without firing anything. The clock never goes backwards.
    pub fn advance_to(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Number of pending tasks of `kind`.
    pub fn active(&self, kind: TaskKind) -> usize {
        self.tasks.iter().filter(|t| t.kind == kind).count()
    }

    fn push(&mut self, kind: TaskKind, delay: Duration, period: Option<Duration>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled {
            id,
            kind,
            due: self.now + delay,
            period,
        });
        tracing::debug!(id = id.0, ?kind, delay_ms = delay.as_millis() as u64, repeating = period.is_some(), "task scheduled");
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskId {
        // A zero period would re-arm at the same instant forever.
        let period = period.max(Duration::from_millis(1));
        self.push(kind, period, Some(period))
    }

    fn schedule_once(&mut self, kind: TaskKind, delay: Duration) -> TaskId {
        self.push(kind, delay, None)
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let cancelled = self.tasks.len() != before;
        if cancelled {
            tracing::debug!(id = id.0, "task cancelled");
        }
        cancelled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/schedule.rs"]
mod tests;
