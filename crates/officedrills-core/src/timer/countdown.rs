//! One-second-granularity countdown with tick invalidation.
//!
//! Each time the countdown is armed or disarmed its generation moves on.
//! A tick carries the [`TickHandle`] it was scheduled under; a handle from
//! an older generation is stale and the tick is ignored. This is what keeps
//! a late tick from double-decrementing or reviving an expired countdown.

use serde::{Deserialize, Serialize};

/// Identifies the tick registration a tick was scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Handle belongs to a cancelled registration; nothing changed.
    Stale,
    Ticked { remaining_secs: u64 },
    /// This tick reached zero. The countdown is disarmed.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: u64,
    generation: u64,
    armed: bool,
}

impl Countdown {
    pub fn new(remaining_secs: u64) -> Self {
        Self {
            remaining_secs,
            generation: 0,
            armed: false,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Handle for the live registration, if armed.
    pub fn handle(&self) -> Option<TickHandle> {
        self.armed.then_some(TickHandle {
            generation: self.generation,
        })
    }

    /// Start a fresh registration, invalidating any previous one.
    pub fn arm(&mut self) -> TickHandle {
        self.generation += 1;
        self.armed = true;
        TickHandle {
            generation: self.generation,
        }
    }

    /// Cancel the live registration. Outstanding handles become stale.
    pub fn disarm(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    pub fn set_remaining(&mut self, secs: u64) {
        self.remaining_secs = secs;
    }

    pub fn tick(&mut self, handle: TickHandle) -> TickOutcome {
        if !self.armed || handle.generation != self.generation {
            return TickOutcome::Stale;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.disarm();
            return TickOutcome::Expired;
        }
        self.remaining_secs -= 1;
        TickOutcome::Ticked {
            remaining_secs: self.remaining_secs,
        }
    }
}
