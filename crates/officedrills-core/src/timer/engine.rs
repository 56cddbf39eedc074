//! Break timer implementation.
//!
//! The controller is a countdown state machine. It does not use internal
//! threads - the caller delivers one `tick()` per elapsed second, passing
//! the [`TickHandle`] it got when it scheduled that tick.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running) -> Expired -> Running | Idle
//! ```
//!
//! Every command is total. A command that does not apply in the current
//! phase returns `None` and changes nothing:
//!
//! | command  | Idle    | Running | Paused  | Expired |
//! |----------|---------|---------|---------|---------|
//! | start    | Running | no-op   | Running | Running |
//! | pause    | no-op   | Paused  | no-op   | no-op   |
//! | resume   | no-op   | no-op   | Running | no-op   |
//! | stop     | no-op   | Idle    | Idle    | Idle    |
//! | reset    | Idle    | Idle    | Idle    | Idle    |
//! | snooze   | Running | Running | Running | Running |
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = TimerController::new(settings.interval_secs());
//! timer.start();
//! // once per second:
//! if let Some(handle) = timer.tick_handle() {
//!     if let Some(Event::BreakDue { .. }) = timer.tick(handle) { /* begin break */ }
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::countdown::{Countdown, TickHandle, TickOutcome};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero; a break is due.
    Expired,
}

/// Host-facing view of the timer.
///
/// `next_break_time` is set iff `is_running && !is_paused`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub is_running: bool,
    pub is_paused: bool,
    /// Seconds.
    pub time_remaining: u64,
    pub next_break_time: Option<DateTime<Utc>>,
}

/// Countdown to the next break.
#[derive(Debug, Clone)]
pub struct TimerController<C: Clock = SystemClock> {
    phase: TimerPhase,
    countdown: Countdown,
    /// Configured interval in seconds; what `reset(None)` restores.
    interval_secs: u64,
    next_break_time: Option<DateTime<Utc>>,
    clock: C,
}

impl TimerController<SystemClock> {
    /// Create an idle timer with `interval_secs` on the clock.
    pub fn new(interval_secs: u64) -> Self {
        Self::with_clock(interval_secs, SystemClock)
    }
}

impl<C: Clock> TimerController<C> {
    pub fn with_clock(interval_secs: u64, clock: C) -> Self {
        Self {
            phase: TimerPhase::Idle,
            countdown: Countdown::new(interval_secs),
            interval_secs,
            next_break_time: None,
            clock,
        }
    }

    /// Rebuild a controller from a saved [`TimerState`].
    ///
    /// A running timer's remaining time is recomputed from its deadline, so
    /// wall-clock time spent between save and restore counts down. A deadline
    /// already in the past restores as `Expired`, and so does a stopped timer
    /// with nothing left on it.
    pub fn restore(interval_secs: u64, state: &TimerState, clock: C) -> Self {
        let mut timer = Self::with_clock(interval_secs, clock);
        timer.countdown.set_remaining(state.time_remaining);
        match (state.is_running, state.is_paused, state.next_break_time) {
            (true, false, Some(deadline)) => {
                let left = (deadline - timer.clock.now()).num_seconds();
                if left <= 0 {
                    timer.countdown.set_remaining(0);
                    timer.phase = TimerPhase::Expired;
                } else {
                    timer.countdown.set_remaining(left as u64);
                    timer.countdown.arm();
                    timer.phase = TimerPhase::Running;
                    timer.next_break_time = Some(deadline);
                }
            }
            (true, true, _) => timer.phase = TimerPhase::Paused,
            (false, _, _) if state.time_remaining == 0 => timer.phase = TimerPhase::Expired,
            _ => {}
        }
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn time_remaining(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn next_break_time(&self) -> Option<DateTime<Utc>> {
        self.next_break_time
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TimerPhase::Running | TimerPhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// Handle to schedule the next tick under. `None` unless running.
    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.countdown.handle()
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            is_running: self.is_running(),
            is_paused: self.is_paused(),
            time_remaining: self.time_remaining(),
            next_break_time: self.next_break_time,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            is_running: self.is_running(),
            is_paused: self.is_paused(),
            remaining_secs: self.time_remaining(),
            next_break_at: self.next_break_time,
            at: self.clock.now(),
        }
    }

    /// Change the configured interval. Takes effect at the next `reset(None)`.
    pub fn set_interval(&mut self, interval_secs: u64) {
        self.interval_secs = interval_secs;
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down.
    ///
    /// From `Paused` this is `resume()`. The deadline is `now` plus whatever
    /// is left, so a timer at zero expires again on the next tick; use
    /// `reset(None)` to reload the interval.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Running => None,
            TimerPhase::Paused => self.resume(),
            TimerPhase::Idle | TimerPhase::Expired => {
                let next_break_at = self.arm();
                debug!(remaining_secs = self.time_remaining(), "timer started");
                Some(Event::TimerStarted {
                    duration_secs: self.time_remaining(),
                    next_break_at,
                    at: self.clock.now(),
                })
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.countdown.disarm();
        self.phase = TimerPhase::Paused;
        self.next_break_time = None;
        debug!(remaining_secs = self.time_remaining(), "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.time_remaining(),
            at: self.clock.now(),
        })
    }

    /// Continue from where `pause()` froze. The deadline is recomputed from
    /// now, never reused.
    pub fn resume(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Paused {
            return None;
        }
        let next_break_at = self.arm();
        debug!(remaining_secs = self.time_remaining(), "timer resumed");
        Some(Event::TimerResumed {
            remaining_secs: self.time_remaining(),
            next_break_at,
            at: self.clock.now(),
        })
    }

    /// Back to `Idle`, keeping the remaining time.
    pub fn stop(&mut self) -> Option<Event> {
        if self.phase == TimerPhase::Idle {
            return None;
        }
        self.disarm_to(TimerPhase::Idle);
        debug!("timer stopped");
        Some(Event::TimerStopped {
            remaining_secs: self.time_remaining(),
            at: self.clock.now(),
        })
    }

    /// Back to `Idle` with `new_time` seconds, or the configured interval.
    pub fn reset(&mut self, new_time: Option<u64>) -> Option<Event> {
        self.disarm_to(TimerPhase::Idle);
        self.countdown
            .set_remaining(new_time.unwrap_or(self.interval_secs));
        debug!(remaining_secs = self.time_remaining(), "timer reset");
        Some(Event::TimerReset {
            remaining_secs: self.time_remaining(),
            at: self.clock.now(),
        })
    }

    /// Push the break `minutes` into the future and run, whatever the phase.
    ///
    /// `snooze(0)` makes the break due on the next tick.
    pub fn snooze(&mut self, minutes: u32) -> Option<Event> {
        self.countdown
            .set_remaining(u64::from(minutes).saturating_mul(60));
        let next_break_at = self.arm();
        debug!(minutes, "timer snoozed");
        Some(Event::TimerSnoozed {
            minutes,
            next_break_at,
            at: self.clock.now(),
        })
    }

    /// Deliver one elapsed second. Returns `Some(Event::BreakDue)` exactly
    /// once, on the tick that reaches zero. Stale handles are ignored.
    pub fn tick(&mut self, handle: TickHandle) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        match self.countdown.tick(handle) {
            TickOutcome::Stale | TickOutcome::Ticked { .. } => None,
            TickOutcome::Expired => {
                self.phase = TimerPhase::Expired;
                self.next_break_time = None;
                debug!("break due");
                Some(Event::BreakDue {
                    at: self.clock.now(),
                })
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm(&mut self) -> DateTime<Utc> {
        self.countdown.arm();
        self.phase = TimerPhase::Running;
        let secs = i64::try_from(self.time_remaining()).unwrap_or(i64::MAX);
        let next = self.clock.now() + Duration::seconds(secs);
        self.next_break_time = Some(next);
        next
    }

    fn disarm_to(&mut self, phase: TimerPhase) {
        self.countdown.disarm();
        self.phase = phase;
        self.next_break_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;
    use chrono::TimeZone;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    fn run_ticks<C: Clock>(
        timer: &mut TimerController<C>,
        clock: &ManualClock,
        n: u64,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            clock.advance_secs(1);
            if let Some(handle) = timer.tick_handle() {
                events.extend(timer.tick(handle));
            }
        }
        events
    }

    #[test]
    fn starts_idle_with_interval() {
        let timer = TimerController::new(1800);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.time_remaining(), 1800);
        assert_eq!(timer.next_break_time(), None);
        assert_eq!(timer.tick_handle(), None);
    }

    #[test]
    fn start_sets_deadline_and_expires_once() {
        let clock = clock();
        let t0 = clock.now();
        let mut timer = TimerController::with_clock(1500, clock.clone());

        assert!(timer.start().is_some());
        assert_eq!(
            timer.next_break_time(),
            Some(t0 + Duration::milliseconds(1_500_000))
        );
        assert!(timer.start().is_none());

        let events = run_ticks(&mut timer, &clock, 1500);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::BreakDue { .. }));
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(
            timer.state(),
            TimerState {
                is_running: false,
                is_paused: false,
                time_remaining: 0,
                next_break_time: None,
            }
        );

        assert!(run_ticks(&mut timer, &clock, 10).is_empty());
    }

    #[test]
    fn resume_recomputes_deadline() {
        let clock = clock();
        let mut timer = TimerController::with_clock(1500, clock.clone());
        timer.start();
        run_ticks(&mut timer, &clock, 900);
        assert_eq!(timer.time_remaining(), 600);

        timer.pause();
        assert_eq!(timer.state().next_break_time, None);
        assert!(timer.state().is_running && timer.state().is_paused);

        clock.advance_secs(3600);
        let resumed_at = clock.now();
        timer.resume();
        assert_eq!(
            timer.next_break_time(),
            Some(resumed_at + Duration::milliseconds(600_000))
        );
    }

    #[test]
    fn pause_freezes_and_drops_pending_ticks() {
        let clock = clock();
        let mut timer = TimerController::with_clock(60, clock.clone());
        timer.start();
        let pending = timer.tick_handle().unwrap();
        timer.pause();
        assert!(timer.tick(pending).is_none());
        assert_eq!(timer.time_remaining(), 60);

        timer.resume();
        assert!(timer.tick(pending).is_none());
        assert_eq!(timer.time_remaining(), 60);
    }

    #[test]
    fn snooze_always_runs_with_new_time() {
        let preparations: [fn(&mut TimerController<ManualClock>); 4] = [
            |_t| {},
            |t| {
                t.start();
            },
            |t| {
                t.start();
                t.pause();
            },
            |t| {
                t.snooze(0);
                let h = t.tick_handle().unwrap();
                t.tick(h);
            },
        ];
        for prepare in preparations {
            let clock = clock();
            let mut timer = TimerController::with_clock(1800, clock.clone());
            prepare(&mut timer);
            timer.snooze(10);
            assert_eq!(timer.time_remaining(), 600);
            assert!(timer.is_running());
            assert!(!timer.is_paused());
            assert_eq!(timer.next_break_time(), Some(clock.now() + Duration::seconds(600)));
        }
    }

    #[test]
    fn snooze_invalidates_previous_ticks() {
        let clock = clock();
        let mut timer = TimerController::with_clock(5, clock.clone());
        timer.start();
        let old = timer.tick_handle().unwrap();
        timer.snooze(1);
        assert!(timer.tick(old).is_none());
        assert_eq!(timer.time_remaining(), 60);
    }

    #[test]
    fn stop_keeps_remaining_and_is_noop_when_idle() {
        let clock = clock();
        let mut timer = TimerController::with_clock(100, clock.clone());
        assert!(timer.stop().is_none());
        timer.start();
        run_ticks(&mut timer, &clock, 40);
        assert!(timer.stop().is_some());
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.time_remaining(), 60);
        assert_eq!(timer.next_break_time(), None);
    }

    #[test]
    fn reset_restores_interval_or_given_time() {
        let clock = clock();
        let mut timer = TimerController::with_clock(100, clock.clone());
        timer.start();
        run_ticks(&mut timer, &clock, 10);
        timer.reset(None);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.time_remaining(), 100);
        timer.reset(Some(42));
        assert_eq!(timer.time_remaining(), 42);
    }

    #[test]
    fn restart_after_expiry_is_due_on_next_tick() {
        let clock = clock();
        let mut timer = TimerController::with_clock(3, clock.clone());
        timer.start();
        run_ticks(&mut timer, &clock, 3);
        assert_eq!(timer.phase(), TimerPhase::Expired);

        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.time_remaining(), 0);
        assert_eq!(timer.next_break_time(), Some(clock.now()));

        let events = run_ticks(&mut timer, &clock, 1);
        assert!(matches!(events.as_slice(), [Event::BreakDue { .. }]));
        assert_eq!(timer.phase(), TimerPhase::Expired);
    }

    #[test]
    fn start_at_zero_sets_deadline_to_now() {
        let clock = clock();
        let mut timer = TimerController::with_clock(1800, clock.clone());
        timer.reset(Some(0));
        match timer.start() {
            Some(Event::TimerStarted {
                duration_secs,
                next_break_at,
                ..
            }) => {
                assert_eq!(duration_secs, 0);
                assert_eq!(next_break_at, clock.now());
            }
            other => panic!("Expected TimerStarted, got {other:?}"),
        }
        assert_eq!(timer.next_break_time(), Some(clock.now()));
    }

    #[test]
    fn inapplicable_commands_are_noops() {
        let mut timer = TimerController::new(10);
        assert!(timer.pause().is_none());
        assert!(timer.resume().is_none());
        assert_eq!(timer.phase(), TimerPhase::Idle);
        timer.start();
        assert!(timer.resume().is_none());
        timer.pause();
        assert!(timer.pause().is_none());
        assert!(timer.start().is_some());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn restore_counts_down_across_saves() {
        let clock = clock();
        let mut timer = TimerController::with_clock(600, clock.clone());
        timer.start();
        let saved = timer.state();

        clock.advance_secs(200);
        let restored = TimerController::restore(600, &saved, clock.clone());
        assert_eq!(restored.phase(), TimerPhase::Running);
        assert_eq!(restored.time_remaining(), 400);
        assert_eq!(restored.next_break_time(), saved.next_break_time);

        clock.advance_secs(500);
        let late = TimerController::restore(600, &saved, clock.clone());
        assert_eq!(late.phase(), TimerPhase::Expired);
        assert_eq!(late.time_remaining(), 0);
    }

    #[test]
    fn restore_keeps_paused_and_idle_time() {
        let clock = clock();
        let paused = TimerState {
            is_running: true,
            is_paused: true,
            time_remaining: 321,
            next_break_time: None,
        };
        let timer = TimerController::restore(600, &paused, clock.clone());
        assert_eq!(timer.phase(), TimerPhase::Paused);
        assert_eq!(timer.time_remaining(), 321);
        assert_eq!(timer.tick_handle(), None);

        let idle = TimerState {
            is_running: false,
            ..paused
        };
        let timer = TimerController::restore(600, &idle, clock);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.time_remaining(), 321);
    }

    #[test]
    fn restore_keeps_expired_timer_expired() {
        let clock = clock();
        let mut timer = TimerController::with_clock(2, clock.clone());
        timer.start();
        run_ticks(&mut timer, &clock, 2);
        assert_eq!(timer.phase(), TimerPhase::Expired);

        let restored = TimerController::restore(2, &timer.state(), clock);
        assert_eq!(restored.phase(), TimerPhase::Expired);
        assert_eq!(restored.time_remaining(), 0);
        assert_eq!(restored.next_break_time(), None);
        assert_eq!(restored.tick_handle(), None);
    }

    #[test]
    fn snapshot_reports_state() {
        let timer = TimerController::new(1800);
        match timer.snapshot() {
            Event::StateSnapshot {
                phase,
                remaining_secs,
                next_break_at,
                ..
            } => {
                assert_eq!(phase, TimerPhase::Idle);
                assert_eq!(remaining_secs, 1800);
                assert_eq!(next_break_at, None);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
