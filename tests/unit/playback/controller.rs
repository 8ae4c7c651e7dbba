use proptest::prelude::*;

use super::*;
use crate::{
    playback::schedule::VirtualScheduler,
    trace::step::{MethodKind, Step},
};

const TICK: Duration = Duration::from_millis(1000);

fn trace(len: usize) -> StepTrace {
    let steps = (0..len)
        .map(|i| Step::Newton {
            x_prev: i as f64 + 1.0,
            fx: 1.0,
            x_new: i as f64 + 0.5,
        })
        .collect();
    StepTrace::new(MethodKind::Newton, steps).unwrap()
}

fn loaded(len: usize) -> (PlaybackController, VirtualScheduler) {
    let mut sched = VirtualScheduler::new();
    let mut c = PlaybackController::new(TICK);
    assert_eq!(c.load_trace(trace(len), &mut sched), 0);
    (c, sched)
}

// Fire every tick due up to `until`, feeding them to the controller.
fn run_until(c: &mut PlaybackController, sched: &mut VirtualScheduler, until: Duration) {
    while let Some(f) = sched.pop_due(until) {
        if f.kind == TaskKind::PlaybackTick {
            c.on_tick(f.id, sched);
        }
    }
    sched.advance_to(until);
}

#[test]
fn starts_idle_and_ignores_commands() {
    let mut sched = VirtualScheduler::new();
    let mut c = PlaybackController::new(TICK);
    assert_eq!(c.state().status, PlaybackStatus::Idle);
    assert_eq!(c.next(&mut sched), None);
    assert_eq!(c.prev(&mut sched), None);
    assert_eq!(c.toggle_play(&mut sched), None);
    assert_eq!(c.seek(3, &mut sched), None);
    assert_eq!(c.controls().counter, "0 / 0");
    assert_eq!(sched.active(TaskKind::PlaybackTick), 0);
}

#[test]
fn single_step_trace_disables_navigation_and_autoplay() {
    let (mut c, mut sched) = loaded(1);
    assert_eq!(c.next(&mut sched), None);
    assert_eq!(c.prev(&mut sched), None);
    assert_eq!(c.toggle_play(&mut sched), None);
    assert_eq!(c.state(), PlaybackState { index: 0, status: PlaybackStatus::Ready });
    assert_eq!(sched.active(TaskKind::PlaybackTick), 0);

    let ctl = c.controls();
    assert!(!ctl.prev_enabled && !ctl.next_enabled && !ctl.play_enabled && !ctl.playing);
    assert_eq!(ctl.counter, "1 / 1");
}

#[test]
fn autoplay_runs_to_the_end_and_cancels_its_timer() {
    let (mut c, mut sched) = loaded(4);
    assert_eq!(c.toggle_play(&mut sched), None);
    assert_eq!(c.state().status, PlaybackStatus::Playing);
    assert!(c.controls().playing);

    run_until(&mut c, &mut sched, Duration::from_millis(3000));
    assert_eq!(c.state(), PlaybackState { index: 3, status: PlaybackStatus::Finished });
    assert_eq!(c.timer(), None);
    assert_eq!(sched.active(TaskKind::PlaybackTick), 0);

    run_until(&mut c, &mut sched, Duration::from_millis(10_000));
    assert_eq!(c.state().index, 3);
}

#[test]
fn manual_next_stops_autoplay() {
    let (mut c, mut sched) = loaded(5);
    c.toggle_play(&mut sched);
    run_until(&mut c, &mut sched, Duration::from_millis(1000));
    assert_eq!(c.state().index, 1);

    assert_eq!(c.next(&mut sched), Some(2));
    assert_eq!(c.state().status, PlaybackStatus::Paused);
    assert_eq!(sched.active(TaskKind::PlaybackTick), 0);

    run_until(&mut c, &mut sched, Duration::from_millis(5000));
    assert_eq!(c.state().index, 2);
}

#[test]
fn prev_stops_autoplay_and_clamps_at_zero() {
    let (mut c, mut sched) = loaded(3);
    assert_eq!(c.prev(&mut sched), None);
    c.toggle_play(&mut sched);
    run_until(&mut c, &mut sched, Duration::from_millis(1000));
    assert_eq!(c.prev(&mut sched), Some(0));
    assert_eq!(c.state().status, PlaybackStatus::Paused);
    assert_eq!(c.timer(), None);
}

#[test]
fn play_from_last_step_rewinds() {
    let (mut c, mut sched) = loaded(3);
    assert_eq!(c.seek(99, &mut sched), Some(2));
    assert_eq!(c.state().status, PlaybackStatus::Finished);
    assert_eq!(c.toggle_play(&mut sched), Some(0));
    assert_eq!(c.state(), PlaybackState { index: 0, status: PlaybackStatus::Playing });
    assert_eq!(sched.active(TaskKind::PlaybackTick), 1);
}

#[test]
fn stale_tick_is_ignored_after_stop() {
    let (mut c, mut sched) = loaded(4);
    c.toggle_play(&mut sched);
    let old = c.timer().unwrap();
    c.stop(&mut sched);
    assert_eq!(c.on_tick(old, &mut sched), None);
    assert_eq!(c.state(), PlaybackState { index: 0, status: PlaybackStatus::Paused });
}

#[test]
fn loading_a_trace_cancels_autoplay_and_rewinds() {
    let (mut c, mut sched) = loaded(4);
    c.toggle_play(&mut sched);
    run_until(&mut c, &mut sched, Duration::from_millis(2000));
    assert_eq!(c.load_trace(trace(2), &mut sched), 0);
    assert_eq!(c.state(), PlaybackState { index: 0, status: PlaybackStatus::Ready });
    assert_eq!(sched.active(TaskKind::PlaybackTick), 0);
}

#[test]
fn counter_is_one_based() {
    let (mut c, mut sched) = loaded(5);
    c.next(&mut sched);
    assert_eq!(c.controls().counter, "2 / 5");
    assert!(c.controls().prev_enabled);
    c.seek(4, &mut sched);
    assert!(!c.controls().next_enabled);
}

#[derive(Clone, Debug)]
enum Cmd {
    Next,
    Prev,
    Toggle,
    Stop,
    Seek(usize),
    Wait(u64),
}

fn cmd() -> impl Strategy<Value = Cmd> {
    prop_oneof![
        Just(Cmd::Next),
        Just(Cmd::Prev),
        Just(Cmd::Toggle),
        Just(Cmd::Stop),
        (0usize..12).prop_map(Cmd::Seek),
        (0u64..3500).prop_map(Cmd::Wait),
    ]
}

proptest! {
    #[test]
    fn index_stays_in_bounds_with_at_most_one_timer(
        len in 1usize..8,
        cmds in proptest::collection::vec(cmd(), 0..40),
    ) {
        let (mut c, mut sched) = loaded(len);
        for cmd in cmds {
            match cmd {
                Cmd::Next => { c.next(&mut sched); }
                Cmd::Prev => { c.prev(&mut sched); }
                Cmd::Toggle => { c.toggle_play(&mut sched); }
                Cmd::Stop => c.stop(&mut sched),
                Cmd::Seek(i) => { c.seek(i, &mut sched); }
                Cmd::Wait(ms) => {
                    let until = sched.now() + Duration::from_millis(ms);
                    run_until(&mut c, &mut sched, until);
                }
            }
            prop_assert!(c.state().index < len);
            prop_assert!(sched.active(TaskKind::PlaybackTick) <= 1);
            prop_assert_eq!(
                c.state().status == PlaybackStatus::Playing,
                sched.active(TaskKind::PlaybackTick) == 1
            );
        }
    }

    #[test]
    fn double_toggle_returns_to_paused_at_same_index(len in 2usize..8, at in 0usize..7) {
        let (mut c, mut sched) = loaded(len);
        let at = at.min(len - 2);
        c.seek(at, &mut sched);
        c.toggle_play(&mut sched);
        c.toggle_play(&mut sched);
        prop_assert_eq!(c.state(), PlaybackState { index: at, status: PlaybackStatus::Paused });
        prop_assert_eq!(sched.active(TaskKind::PlaybackTick), 0);
    }
}
