//! Break history, aggregate stats, and CSV export.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::BreakSession;

pub const CSV_HEADER: &str = "Date,Time,Category,Exercise,Status,Duration";

/// Value written to the CSV `Duration` column for every row.
const CSV_DURATION: &str = "30";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    All,
}

impl Period {
    pub fn includes(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Period::Today => date == today,
            Period::Week => date >= today - Duration::days(7),
            Period::Month => date >= today - Duration::days(30),
            Period::All => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_sessions: u64,
    pub total_exercises: u64,
    pub completed_exercises: u64,
    /// Rounded to whole minutes.
    pub total_duration_min: u64,
    /// Rounded percent of offered exercises that were completed.
    pub completion_rate: u64,
}

/// Recorded breaks, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    sessions: Vec<BreakSession>,
}

impl History {
    pub fn new(sessions: Vec<BreakSession>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &[BreakSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn push(&mut self, session: BreakSession) {
        self.sessions.insert(0, session);
    }

    pub fn in_period(&self, period: Period, today: NaiveDate) -> Vec<&BreakSession> {
        self.sessions
            .iter()
            .filter(|s| period.includes(s.date, today))
            .collect()
    }

    pub fn stats(&self, period: Period, today: NaiveDate) -> Stats {
        let sessions = self.in_period(period, today);
        let total_exercises: usize = sessions.iter().map(|s| s.exercises.len()).sum();
        let completed_exercises: usize = sessions.iter().map(|s| s.completed_count()).sum();
        let total_duration: u64 = sessions.iter().map(|s| s.total_duration).sum();
        let completion_rate = if total_exercises > 0 {
            (completed_exercises as f64 / total_exercises as f64 * 100.0).round() as u64
        } else {
            0
        };

        Stats {
            total_sessions: sessions.len() as u64,
            total_exercises: total_exercises as u64,
            completed_exercises: completed_exercises as u64,
            total_duration_min: (total_duration as f64 / 60.0).round() as u64,
            completion_rate,
        }
    }

    /// One row per exercise outcome, sessions in history order.
    ///
    /// The `Duration` column is always `30`, whatever the exercise's
    /// configured length; existing spreadsheets depend on that.
    pub fn export_csv(&self) -> String {
        let rows: Vec<String> = self
            .sessions
            .iter()
            .flat_map(|session| {
                session.exercises.iter().map(move |exercise| {
                    [
                        session.date.to_string(),
                        session.timestamp.format("%H:%M:%S").to_string(),
                        session.category.to_string(),
                        csv_field(&exercise.exercise_name),
                        exercise.status().as_str().to_string(),
                        CSV_DURATION.to_string(),
                    ]
                    .join(",")
                })
            })
            .collect();
        format!("{CSV_HEADER}\n{}", rows.join("\n"))
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
