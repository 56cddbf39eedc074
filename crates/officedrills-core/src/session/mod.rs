//! Break sessions: the walkthrough that produces them and the history that
//! keeps them.

mod history;
mod walkthrough;

pub use history::{History, Period, Stats, CSV_HEADER};
pub use walkthrough::{CompletedBreak, SessionRecorder, WalkthroughStatus};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::exercise::CategoryFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseStatus {
    Completed,
    Skipped,
    Incomplete,
}

impl ExerciseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStatus::Completed => "Completed",
            ExerciseStatus::Skipped => "Skipped",
            ExerciseStatus::Incomplete => "Incomplete",
        }
    }
}

/// Outcome of one offered exercise. Holds copies of the id and name, not a
/// reference into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub exercise_id: String,
    pub exercise_name: String,
    pub completed: bool,
    pub skipped: bool,
}

impl ExerciseResult {
    pub fn status(&self) -> ExerciseStatus {
        if self.completed {
            ExerciseStatus::Completed
        } else if self.skipped {
            ExerciseStatus::Skipped
        } else {
            ExerciseStatus::Incomplete
        }
    }
}

/// One finished break. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSession {
    pub id: String,
    /// Calendar day (UTC) the break finished on.
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub category: CategoryFilter,
    pub exercises: Vec<ExerciseResult>,
    /// Sum of the configured durations of every offered exercise, seconds.
    pub total_duration: u64,
}

impl BreakSession {
    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.skipped).count()
    }

    /// Ids of completed exercises, in walkthrough order.
    pub fn completed_ids(&self) -> Vec<String> {
        self.exercises
            .iter()
            .filter(|e| e.completed)
            .map(|e| e.exercise_id.clone())
            .collect()
    }
}
