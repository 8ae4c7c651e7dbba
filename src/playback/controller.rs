use std::time::Duration;

use crate::{
    playback::schedule::{Scheduler, TaskId, TaskKind},
    trace::step::StepTrace,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// No trace loaded.
    Idle,
    /// Trace loaded, autoplay never started or reset.
    Ready,
    Playing,
    Paused,
    /// Showing the last step.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlaybackState {
    pub index: usize,
    pub status: PlaybackStatus,
}

/// What the navigation controls should look like for the current state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Controls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub play_enabled: bool,
    pub playing: bool,
    /// 1-based `"current / total"`.
    pub counter: String,
}

/// Owns the cursor into a loaded trace and the autoplay timer.
///
/// Every command that moves the cursor returns the index to render, or `None` when nothing
/// changed. Once a trace is loaded `index < trace.len()` holds after every command.
#[derive(Debug)]
pub struct PlaybackController {
    tick: Duration,
    trace: Option<StepTrace>,
    index: usize,
    status: PlaybackStatus,
    timer: Option<TaskId>,
}

impl PlaybackController {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            trace: None,
            index: 0,
            status: PlaybackStatus::Idle,
            timer: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            index: self.index,
            status: self.status,
        }
    }

    pub fn trace(&self) -> Option<&StepTrace> {
        self.trace.as_ref()
    }

    pub fn tick_period(&self) -> Duration {
        self.tick
    }

    /// Id of the running autoplay timer.
    pub fn timer(&self) -> Option<TaskId> {
        self.timer
    }

    /// Replace the trace, rewinding to step 0. Always requires a render of step 0.
    #[tracing::instrument(level = "debug", skip_all, fields(method = %trace.method(), len = trace.len()))]
    pub fn load_trace(&mut self, trace: StepTrace, sched: &mut dyn Scheduler) -> usize {
        self.cancel_timer(sched);
        self.trace = Some(trace);
        self.index = 0;
        self.transition(PlaybackStatus::Ready);
        0
    }

    pub fn next(&mut self, sched: &mut dyn Scheduler) -> Option<usize> {
        if self.trace.is_none() {
            return None;
        }
        self.stop(sched);
        self.advance(sched, false)
    }

    pub fn prev(&mut self, sched: &mut dyn Scheduler) -> Option<usize> {
        if self.trace.is_none() {
            return None;
        }
        self.stop(sched);
        if self.index == 0 {
            return None;
        }
        self.move_to(self.index - 1)
    }

    /// Jump to `index`, clamped to the trace. Stops autoplay.
    pub fn seek(&mut self, index: usize, sched: &mut dyn Scheduler) -> Option<usize> {
        let last = self.trace.as_ref()?.last_index();
        self.stop(sched);
        let index = index.min(last);
        if index == self.index {
            return None;
        }
        self.move_to(index)
    }

    /// Pause when playing; otherwise start autoplay, rewinding first if on the last step.
    pub fn toggle_play(&mut self, sched: &mut dyn Scheduler) -> Option<usize> {
        let last = self.trace.as_ref()?.last_index();
        if last == 0 {
            return None;
        }
        if self.status == PlaybackStatus::Playing {
            self.stop(sched);
            return None;
        }

        let redraw = if self.index == last {
            self.index = 0;
            Some(0)
        } else {
            None
        };
        self.cancel_timer(sched);
        self.timer = Some(sched.schedule_repeating(TaskKind::PlaybackTick, self.tick));
        self.transition(PlaybackStatus::Playing);
        redraw
    }

    /// Cancel autoplay. A no-op when not playing.
    pub fn stop(&mut self, sched: &mut dyn Scheduler) {
        self.cancel_timer(sched);
        if self.status == PlaybackStatus::Playing {
            self.transition(PlaybackStatus::Paused);
        }
    }

    /// Handle a fired playback tick. Ticks from anything but the active timer are ignored.
    pub fn on_tick(&mut self, id: TaskId, sched: &mut dyn Scheduler) -> Option<usize> {
        if self.timer != Some(id) {
            tracing::debug!(id = id.get(), "ignoring tick from inactive timer");
            return None;
        }
        self.advance(sched, true)
    }

    pub fn controls(&self) -> Controls {
        let Some(trace) = &self.trace else {
            return Controls {
                prev_enabled: false,
                next_enabled: false,
                play_enabled: false,
                playing: false,
                counter: "0 / 0".to_owned(),
            };
        };
        Controls {
            prev_enabled: self.index > 0,
            next_enabled: self.index < trace.last_index(),
            play_enabled: trace.len() > 1,
            playing: self.status == PlaybackStatus::Playing,
            counter: format!("{} / {}", self.index + 1, trace.len()),
        }
    }

    fn advance(&mut self, sched: &mut dyn Scheduler, from_timer: bool) -> Option<usize> {
        let last = self.trace.as_ref()?.last_index();
        if self.index >= last {
            self.cancel_timer(sched);
            return None;
        }
        self.index += 1;
        if self.index == last {
            self.cancel_timer(sched);
            self.transition(PlaybackStatus::Finished);
        } else if !from_timer {
            self.settle();
        }
        Some(self.index)
    }

    fn move_to(&mut self, index: usize) -> Option<usize> {
        self.index = index;
        let last = self.trace.as_ref().map_or(0, StepTrace::last_index);
        if index == last {
            self.transition(PlaybackStatus::Finished);
        } else {
            self.settle();
        }
        Some(index)
    }

    // Status after a manual move that did not land on the last step.
    fn settle(&mut self) {
        if self.status != PlaybackStatus::Ready {
            self.transition(PlaybackStatus::Paused);
        }
    }

    fn cancel_timer(&mut self, sched: &mut dyn Scheduler) {
        if let Some(id) = self.timer.take() {
            sched.cancel(id);
        }
    }

    fn transition(&mut self, to: PlaybackStatus) {
        if self.status != to {
            tracing::debug!(from = ?self.status, to = ?to, index = self.index, "playback transition");
            self.status = to;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
