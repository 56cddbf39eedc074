use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every state change in the engine produces an Event.
/// The host polls for snapshots; transitions return the event they caused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        next_break_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        next_break_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    TimerStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerSnoozed {
        minutes: u32,
        next_break_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Fired once per cycle.
    BreakDue {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        is_running: bool,
        is_paused: bool,
        remaining_secs: u64,
        next_break_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    ExerciseStarted {
        index: usize,
        exercise_id: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ExercisePaused {
        index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        index: usize,
        exercise_id: String,
        at: DateTime<Utc>,
    },
    ExerciseSkipped {
        index: usize,
        exercise_id: String,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        session_id: String,
        completed: usize,
        skipped: usize,
        total_duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        index: usize,
        at: DateTime<Utc>,
    },
}
