//! Exercise selection for the next break.
//!
//! Filters the catalog by category and cooldown, then draws a short list
//! that favours distinct categories when the filter is `All`. Randomness is
//! supplied by the caller so a seeded generator gives repeatable picks.
//!
//! Selection is read-only: the cooldown memory is updated later, and only
//! for exercises that were actually completed.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::cooldown::CooldownMemory;
use crate::exercise::{Category, CategoryFilter, Exercise};
use crate::storage::Settings;

/// Exercises offered per break.
pub const EXERCISES_PER_BREAK: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseSelector {
    per_break: usize,
}

impl Default for ExerciseSelector {
    fn default() -> Self {
        Self {
            per_break: EXERCISES_PER_BREAK,
        }
    }
}

impl ExerciseSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up to two exercises for a break.
    ///
    /// When filtering leaves nothing, falls back to the head of the
    /// unfiltered catalog, ignoring both category and cooldown. An empty
    /// result means the catalog itself is empty.
    pub fn select<R>(
        &self,
        category: CategoryFilter,
        settings: &Settings,
        cooldown: &CooldownMemory,
        catalog: &[Exercise],
        rng: &mut R,
    ) -> Vec<Exercise>
    where
        R: Rng + ?Sized,
    {
        let held_back = settings.cooldown_exercises as usize;
        let pool: Vec<&Exercise> = catalog
            .iter()
            .filter(|e| category.matches(e.category))
            .filter(|e| held_back == 0 || !cooldown.is_cooling_down(&e.id, held_back))
            .collect();

        if pool.is_empty() {
            warn!(
                %category,
                catalog_len = catalog.len(),
                "no exercise passes the category and cooldown filters, falling back to catalog head"
            );
            return catalog.iter().take(self.per_break).cloned().collect();
        }

        let picked = match category {
            CategoryFilter::All => self.pick_diverse(&pool, rng),
            CategoryFilter::Only(_) => self.pick_shuffled(&pool, rng),
        };
        debug!(
            %category,
            pool = pool.len(),
            picked = ?picked.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            "exercises selected"
        );
        picked.into_iter().cloned().collect()
    }

    /// One exercise per distinct category first, then top up from whatever
    /// is left in the pool.
    fn pick_diverse<'a, R>(&self, pool: &[&'a Exercise], rng: &mut R) -> Vec<&'a Exercise>
    where
        R: Rng + ?Sized,
    {
        let mut buckets: BTreeMap<Category, Vec<usize>> = BTreeMap::new();
        for (index, exercise) in pool.iter().enumerate() {
            buckets.entry(exercise.category).or_default().push(index);
        }
        let mut buckets: Vec<Vec<usize>> = buckets.into_values().collect();
        buckets.shuffle(rng);

        let mut chosen: Vec<usize> = Vec::with_capacity(self.per_break);
        for bucket in &buckets {
            if chosen.len() >= self.per_break {
                break;
            }
            if let Some(&index) = bucket.choose(rng) {
                chosen.push(index);
            }
        }

        while chosen.len() < self.per_break {
            let remaining: Vec<usize> = (0..pool.len()).filter(|i| !chosen.contains(i)).collect();
            match remaining.choose(rng) {
                Some(&index) => chosen.push(index),
                None => break,
            }
        }

        chosen.into_iter().map(|i| pool[i]).collect()
    }

    fn pick_shuffled<'a, R>(&self, pool: &[&'a Exercise], rng: &mut R) -> Vec<&'a Exercise>
    where
        R: Rng + ?Sized,
    {
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(self.per_break);
        shuffled
    }
}
