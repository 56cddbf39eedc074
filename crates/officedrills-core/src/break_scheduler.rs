//! Ties the timer, selector, walkthrough and persistence together.
//!
//! One cycle looks like this:
//!
//! ```text
//! timer BreakDue -> on_break_due (notify) -> begin_break -> SessionRecorder
//!     -> record_completion (history + cooldown + timer reload)
//! ```
//!
//! A cancelled walkthrough never reaches `record_completion`, so it leaves
//! history and cooldown untouched.

use rand::Rng;
use serde_json::json;
use tracing::info;

use crate::cooldown::CooldownMemory;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::exercise::{Catalog, Exercise};
use crate::notify::{Notification, Notifier};
use crate::selector::ExerciseSelector;
use crate::session::{CompletedBreak, History, SessionRecorder};
use crate::storage::{keys, Settings, Store, StoreExt};
use crate::timer::{Clock, SystemClock, TimerController, TimerState};

pub const BREAK_DUE_TITLE: &str = "Time for a break!";
pub const BREAK_DUE_BODY: &str = "Your micro-break is ready. Click to start exercises.";

pub struct BreakScheduler<S, N, C = SystemClock>
where
    S: Store,
    N: Notifier,
    C: Clock + Clone,
{
    settings: Settings,
    store: S,
    notifier: N,
    selector: ExerciseSelector,
    timer: TimerController<C>,
    clock: C,
}

impl<S: Store, N: Notifier> BreakScheduler<S, N, SystemClock> {
    pub fn new(settings: Settings, store: S, notifier: N) -> Self {
        Self::with_clock(settings, store, notifier, SystemClock)
    }
}

impl<S, N, C> BreakScheduler<S, N, C>
where
    S: Store,
    N: Notifier,
    C: Clock + Clone,
{
    pub fn with_clock(settings: Settings, store: S, notifier: N, clock: C) -> Self {
        let timer = TimerController::with_clock(settings.interval_secs(), clock.clone());
        Self {
            settings,
            store,
            notifier,
            selector: ExerciseSelector::new(),
            timer,
            clock,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. A new interval applies from the next reset.
    pub fn set_settings(&mut self, settings: Settings) {
        self.timer.set_interval(settings.interval_secs());
        self.settings = settings;
    }

    pub fn timer(&self) -> &TimerController<C> {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut TimerController<C> {
        &mut self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Persisted state ──────────────────────────────────────────────

    /// The stored catalog, or the built-ins when nothing is stored yet.
    pub fn catalog(&self) -> Result<Catalog> {
        self.store.load_or_default(keys::EXERCISES)
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        self.store.save(keys::EXERCISES, catalog)
    }

    pub fn cooldown(&self) -> Result<CooldownMemory> {
        self.store.load_or_default(keys::RECENT)
    }

    pub fn history(&self) -> Result<History> {
        self.store.load_or_default(keys::SESSIONS)
    }

    /// Load the saved timer, if any, in place of the current one.
    pub fn restore_timer(&mut self) -> Result<()> {
        if let Some(value) = self.store.get(keys::TIMER)? {
            let state: TimerState = serde_json::from_value(value)?;
            self.timer =
                TimerController::restore(self.settings.interval_secs(), &state, self.clock.clone());
        }
        Ok(())
    }

    pub fn save_timer(&self) -> Result<()> {
        self.store.save(keys::TIMER, &self.timer.state())
    }

    // ── Break cycle ──────────────────────────────────────────────────

    /// What the next break would offer right now. Nothing is recorded.
    pub fn preview_break<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Exercise>> {
        let catalog = self.catalog()?;
        let cooldown = self.cooldown()?;
        Ok(self.selector.select(
            self.settings.selected_category,
            &self.settings,
            &cooldown,
            catalog.exercises(),
            rng,
        ))
    }

    /// Select exercises and open a walkthrough over them.
    ///
    /// # Errors
    /// `NoExercisesAvailable` when the catalog is empty.
    pub fn begin_break<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SessionRecorder<C>> {
        let exercises = self.preview_break(rng)?;
        if exercises.is_empty() {
            return Err(CoreError::NoExercisesAvailable);
        }
        info!(
            exercises = ?exercises.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            "break started"
        );
        SessionRecorder::with_clock(
            exercises,
            self.settings.selected_category,
            self.clock.clone(),
        )
    }

    /// Announce a due break. Silent when notifications are disabled; the
    /// sound rides along only when `sound_enabled` is on.
    pub fn on_break_due(&self) {
        if !self.settings.notifications_enabled {
            return;
        }
        let sound = self
            .settings
            .sound_enabled
            .then_some(self.settings.sound_volume);
        self.notifier
            .notify(&Notification::new(BREAK_DUE_TITLE, BREAK_DUE_BODY).with_sound(sound));
    }

    /// Persist a finished walkthrough and reload the timer for the next
    /// work interval, starting it when `auto_start` is on.
    pub fn record_completion(&mut self, done: CompletedBreak) -> Result<Vec<Event>> {
        let mut history = self.history()?;
        let mut cooldown = self.cooldown()?;

        info!(
            session_id = %done.session.id,
            seen = done.seen.len(),
            "recording break"
        );
        history.push(done.session);
        cooldown.record_seen(done.seen);
        self.store.save(keys::SESSIONS, &history)?;
        self.store.save(keys::RECENT, &cooldown)?;

        let mut events: Vec<Event> = self.timer.reset(None).into_iter().collect();
        if self.settings.auto_start {
            events.extend(self.timer.start());
        }
        Ok(events)
    }

    /// Restore the built-in catalog and forget recently seen exercises.
    pub fn reset_catalog(&self) -> Result<()> {
        self.save_catalog(&Catalog::default())?;
        self.store.save(keys::RECENT, &CooldownMemory::new())?;
        info!("catalog reset to defaults");
        Ok(())
    }

    /// Wipe every stored record and fall back to default settings.
    ///
    /// The catalog returns to the built-ins, history and cooldown are
    /// emptied, and the timer is stopped with a fresh default interval.
    /// Saving the settings file is left to the caller.
    pub fn clear_all(&mut self) -> Result<Vec<Event>> {
        self.save_catalog(&Catalog::default())?;
        self.store.save(keys::SESSIONS, &History::default())?;
        self.store.save(keys::RECENT, &CooldownMemory::new())?;

        self.set_settings(Settings::default());
        let events: Vec<Event> = self.timer.reset(None).into_iter().collect();
        self.save_timer()?;
        info!("all stored data cleared");
        Ok(events)
    }

    /// Settings, catalog and history as one pretty-printed JSON document.
    pub fn backup_json(&self) -> Result<String> {
        let backup = json!({
            "settings": self.settings,
            "exercises": self.catalog()?,
            "sessions": self.history()?,
        });
        Ok(serde_json::to_string_pretty(&backup)?)
    }
}
