//! Break walkthrough.
//!
//! Steps forward through the selected exercises, one countdown per exercise.
//! Each exercise leaves by completion (manual or countdown expiry) or skip;
//! the whole walkthrough can be cancelled at any point. There is no way
//! back to an exercise once it has been left.
//!
//! ```text
//! Active(i) --complete/skip--> Active(i + 1) | Finished
//! Active(i) --cancel---------> Cancelled
//! ```

use tracing::{debug, info};
use uuid::Uuid;

use super::{BreakSession, ExerciseResult};
use crate::error::CoreError;
use crate::events::Event;
use crate::exercise::{CategoryFilter, Exercise};
use crate::timer::{Clock, Countdown, SystemClock, TickHandle, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkthroughStatus {
    Active,
    Finished,
    Cancelled,
}

/// A finished walkthrough: the record to persist and the ids to feed into
/// the cooldown memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedBreak {
    pub session: BreakSession,
    pub seen: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SessionRecorder<C: Clock = SystemClock> {
    exercises: Vec<Exercise>,
    category: CategoryFilter,
    index: usize,
    countdown: Countdown,
    results: Vec<ExerciseResult>,
    status: WalkthroughStatus,
    session: Option<BreakSession>,
    clock: C,
}

impl SessionRecorder<SystemClock> {
    /// # Errors
    /// Returns `NoExercisesAvailable` when `exercises` is empty.
    pub fn new(exercises: Vec<Exercise>, category: CategoryFilter) -> Result<Self, CoreError> {
        Self::with_clock(exercises, category, SystemClock)
    }
}

impl<C: Clock> SessionRecorder<C> {
    pub fn with_clock(
        exercises: Vec<Exercise>,
        category: CategoryFilter,
        clock: C,
    ) -> Result<Self, CoreError> {
        let first = exercises.first().ok_or(CoreError::NoExercisesAvailable)?;
        let countdown = Countdown::new(u64::from(first.duration));
        Ok(Self {
            results: Vec::with_capacity(exercises.len()),
            exercises,
            category,
            index: 0,
            countdown,
            status: WalkthroughStatus::Active,
            session: None,
            clock,
        })
    }

    pub fn status(&self) -> WalkthroughStatus {
        self.status
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Zero-based position of the current exercise.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Exercise> {
        match self.status {
            WalkthroughStatus::Active => self.exercises.get(self.index),
            _ => None,
        }
    }

    pub fn time_remaining(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn is_playing(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.countdown.handle()
    }

    /// 0.0 .. 100.0 through the current exercise.
    pub fn progress_pct(&self) -> f64 {
        let Some(exercise) = self.current() else {
            return 0.0;
        };
        let total = f64::from(exercise.duration);
        if total == 0.0 {
            return 0.0;
        }
        (total - self.time_remaining() as f64) / total * 100.0
    }

    pub fn results(&self) -> &[ExerciseResult] {
        &self.results
    }

    /// Start or continue the current exercise's countdown.
    pub fn play(&mut self) -> Option<Event> {
        let exercise_id = self.current()?.id.clone();
        if self.countdown.is_armed() {
            return None;
        }
        self.countdown.arm();
        Some(Event::ExerciseStarted {
            index: self.index,
            exercise_id,
            remaining_secs: self.time_remaining(),
            at: self.clock.now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.status != WalkthroughStatus::Active || !self.countdown.is_armed() {
            return None;
        }
        self.countdown.disarm();
        Some(Event::ExercisePaused {
            index: self.index,
            remaining_secs: self.time_remaining(),
            at: self.clock.now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Deliver one elapsed second to the current exercise. Reaching zero
    /// completes it.
    pub fn tick(&mut self, handle: TickHandle) -> Vec<Event> {
        if self.status != WalkthroughStatus::Active {
            return Vec::new();
        }
        match self.countdown.tick(handle) {
            TickOutcome::Expired => self.exit_current(true),
            TickOutcome::Stale | TickOutcome::Ticked { .. } => Vec::new(),
        }
    }

    /// Mark the current exercise done and move on.
    pub fn complete(&mut self) -> Vec<Event> {
        if self.status != WalkthroughStatus::Active {
            return Vec::new();
        }
        self.exit_current(true)
    }

    pub fn skip(&mut self) -> Vec<Event> {
        if self.status != WalkthroughStatus::Active {
            return Vec::new();
        }
        self.exit_current(false)
    }

    /// Abandon the walkthrough. Outcomes recorded so far are discarded.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.status != WalkthroughStatus::Active {
            return None;
        }
        self.countdown.disarm();
        self.results.clear();
        self.status = WalkthroughStatus::Cancelled;
        debug!(index = self.index, "break walkthrough cancelled");
        Some(Event::SessionCancelled {
            index: self.index,
            at: self.clock.now(),
        })
    }

    /// The finalized break, once every exercise has been left.
    pub fn completed_break(&self) -> Option<CompletedBreak> {
        let session = self.session.as_ref()?;
        Some(CompletedBreak {
            seen: session.completed_ids(),
            session: session.clone(),
        })
    }

    pub fn into_completed_break(self) -> Option<CompletedBreak> {
        let session = self.session?;
        Some(CompletedBreak {
            seen: session.completed_ids(),
            session,
        })
    }

    fn exit_current(&mut self, completed: bool) -> Vec<Event> {
        let Some(exercise) = self.exercises.get(self.index) else {
            return Vec::new();
        };
        self.countdown.disarm();
        self.results.push(ExerciseResult {
            exercise_id: exercise.id.clone(),
            exercise_name: exercise.name.clone(),
            completed,
            skipped: !completed,
        });

        let at = self.clock.now();
        let mut events = vec![if completed {
            Event::ExerciseCompleted {
                index: self.index,
                exercise_id: exercise.id.clone(),
                at,
            }
        } else {
            Event::ExerciseSkipped {
                index: self.index,
                exercise_id: exercise.id.clone(),
                at,
            }
        }];

        match self.exercises.get(self.index + 1) {
            Some(next) => {
                self.countdown.set_remaining(u64::from(next.duration));
                self.index += 1;
            }
            None => events.push(self.finalize()),
        }
        events
    }

    fn finalize(&mut self) -> Event {
        let timestamp = self.clock.now();
        let session = BreakSession {
            id: Uuid::new_v4().to_string(),
            date: timestamp.date_naive(),
            timestamp,
            category: self.category,
            exercises: self.results.clone(),
            total_duration: self.exercises.iter().map(|e| u64::from(e.duration)).sum(),
        };
        self.status = WalkthroughStatus::Finished;
        info!(
            session_id = %session.id,
            completed = session.completed_count(),
            skipped = session.skipped_count(),
            "break finished"
        );
        let event = Event::SessionCompleted {
            session_id: session.id.clone(),
            completed: session.completed_count(),
            skipped: session.skipped_count(),
            total_duration_secs: session.total_duration,
            at: timestamp,
        };
        self.session = Some(session);
        event
    }
}
