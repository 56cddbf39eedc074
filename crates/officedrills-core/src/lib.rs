//! # Office Drills Core Library
//!
//! Core logic for the Office Drills micro-break scheduler: a countdown to the
//! next break, a selector that picks a couple of desk exercises, and a
//! walkthrough that records what was done. The CLI binary is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: A caller-ticked countdown state machine; the host delivers
//!   one `tick()` per second and gets `Event::BreakDue` when it expires
//! - **Selector**: Category and cooldown filtering with a seeded-RNG draw
//! - **Session**: Break walkthrough, history, stats and CSV export
//! - **Storage**: Key/value persistence (SQLite or memory) and TOML settings
//!
//! ## Key Components
//!
//! - [`TimerController`]: Work-interval countdown
//! - [`ExerciseSelector`]: Picks the exercises for a break
//! - [`SessionRecorder`]: Steps through one break
//! - [`BreakScheduler`]: Wires the pieces to a [`Store`] and a [`Notifier`]

pub mod break_scheduler;
pub mod cooldown;
pub mod error;
pub mod events;
pub mod exercise;
pub mod notify;
pub mod selector;
pub mod session;
pub mod storage;
pub mod timer;

pub use break_scheduler::BreakScheduler;
pub use cooldown::{CooldownMemory, COOLDOWN_CAPACITY};
pub use error::{ConfigError, CoreError, DatabaseError, ImportError, ValidationError};
pub use events::Event;
pub use exercise::{Catalog, Category, CategoryFilter, Exercise, ExerciseDraft};
pub use notify::{LogNotifier, Notification, Notifier, NullNotifier};
pub use selector::{ExerciseSelector, EXERCISES_PER_BREAK};
pub use session::{BreakSession, CompletedBreak, History, Period, SessionRecorder, Stats};
pub use storage::{MemoryStore, Settings, SqliteStore, Store, StoreExt};
pub use timer::{Clock, ManualClock, SystemClock, TimerController, TimerPhase, TimerState};
