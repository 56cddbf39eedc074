//! The live exercise catalog: CRUD, search, and JSON import/export.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{default_exercises, Category, CategoryFilter, Exercise, DEFAULT_DURATION_SECS};
use crate::error::{ImportError, ValidationError};

/// Fields for a new exercise. Missing fields take the catalog defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Outcome of a JSON import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Ordered list of exercises, replaced as a whole value when persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(default_exercises())
    }
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Append a new exercise built from `draft` and return its id.
    ///
    /// # Errors
    /// Returns an error if the name is blank or the duration is zero.
    pub fn add(&mut self, draft: ExerciseDraft) -> Result<String, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        let duration = draft.duration.unwrap_or(DEFAULT_DURATION_SECS);
        if duration == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: "must be greater than zero".into(),
            });
        }
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            duration,
            category: draft.category.unwrap_or(Category::Stretch),
            instructions: draft.instructions,
        };
        let id = exercise.id.clone();
        debug!(%id, name = %exercise.name, "exercise added");
        self.exercises.push(exercise);
        Ok(id)
    }

    /// Replace the exercise with the same id.
    ///
    /// # Errors
    /// Returns an error if no exercise has that id or the duration is zero.
    pub fn update(&mut self, exercise: Exercise) -> Result<(), ValidationError> {
        if exercise.duration == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: "must be greater than zero".into(),
            });
        }
        let slot = self
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise.id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "exercise",
                id: exercise.id.clone(),
            })?;
        *slot = exercise;
        Ok(())
    }

    /// Remove an exercise by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != id);
        before != self.exercises.len()
    }

    pub fn reset_to_defaults(&mut self) {
        self.exercises = default_exercises();
    }

    /// Case-insensitive match on name or description, restricted to `filter`.
    pub fn search(&self, term: &str, filter: CategoryFilter) -> Vec<&Exercise> {
        let needle = term.to_lowercase();
        self.exercises
            .iter()
            .filter(|e| filter.matches(e.category))
            .filter(|e| {
                needle.is_empty()
                    || e.name.to_lowercase().contains(&needle)
                    || e.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Pretty-printed JSON array of the live catalog.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.exercises)
    }

    /// Append every acceptable record of a JSON array.
    ///
    /// A record needs a non-empty `name` and a known `category`. Ids in the
    /// document are ignored; every accepted record gets a fresh one, so
    /// importing the same file twice yields duplicates.
    ///
    /// # Errors
    /// Malformed JSON or a non-array document leaves the catalog untouched.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let doc: Value = serde_json::from_str(json)?;
        let records = match doc {
            Value::Array(records) => records,
            other => {
                return Err(ImportError::NotAnArray {
                    found: json_kind(&other),
                })
            }
        };

        let mut report = ImportReport::default();
        for (index, record) in records.iter().enumerate() {
            match exercise_from_record(record) {
                Some(exercise) => {
                    self.exercises.push(exercise);
                    report.accepted += 1;
                }
                None => {
                    warn!(index, "skipping import record without a name or valid category");
                    report.rejected += 1;
                }
            }
        }
        info!(accepted = report.accepted, rejected = report.rejected, "catalog import finished");
        Ok(report)
    }
}

fn exercise_from_record(record: &Value) -> Option<Exercise> {
    let name = record.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let category: Category = record.get("category")?.as_str()?.parse().ok()?;

    let description = record
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let duration = record
        .get("duration")
        .and_then(Value::as_u64)
        .filter(|d| *d > 0)
        .and_then(|d| u32::try_from(d).ok())
        .unwrap_or(DEFAULT_DURATION_SECS);
    let instructions = record
        .get("instructions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(Exercise {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description,
        duration,
        category,
        instructions,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
