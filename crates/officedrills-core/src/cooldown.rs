//! Bounded recency list of completed exercise ids.
//!
//! Most recent first. The selector reads a prefix of it; only a finished
//! break walkthrough writes to it.

use serde::{Deserialize, Serialize};

/// Maximum number of ids remembered.
pub const COOLDOWN_CAPACITY: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooldownMemory {
    ids: Vec<String>,
}

impl CooldownMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted ids, clamping to capacity.
    pub fn from_ids(mut ids: Vec<String>) -> Self {
        ids.truncate(COOLDOWN_CAPACITY);
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The `n` most recent ids (fewer if the memory is shorter).
    pub fn recent(&self, n: usize) -> &[String] {
        &self.ids[..n.min(self.ids.len())]
    }

    /// Whether `id` is among the `n` most recent entries.
    pub fn is_cooling_down(&self, id: &str, n: usize) -> bool {
        self.recent(n).iter().any(|seen| seen == id)
    }

    /// Prepend `ids` in the given order, keeping the newest 20 entries.
    pub fn record_seen<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut updated: Vec<String> = ids.into_iter().map(Into::into).collect();
        updated.append(&mut self.ids);
        updated.truncate(COOLDOWN_CAPACITY);
        self.ids = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn prepends_in_given_order() {
        let mut memory = CooldownMemory::from_ids(vec!["old".into()]);
        memory.record_seen(["a", "b"]);
        assert_eq!(memory.ids(), ["a", "b", "old"]);
    }

    #[test]
    fn recent_clamps_to_length() {
        let memory = CooldownMemory::from_ids(vec!["a".into(), "b".into()]);
        assert_eq!(memory.recent(5).len(), 2);
        assert!(memory.is_cooling_down("b", 2));
        assert!(!memory.is_cooling_down("b", 1));
        assert!(!memory.is_cooling_down("a", 0));
    }

    #[test]
    fn empty_record_is_noop() {
        let mut memory = CooldownMemory::from_ids(vec!["a".into()]);
        memory.record_seen(Vec::<String>::new());
        assert_eq!(memory.ids(), ["a"]);
    }

    #[test]
    fn from_ids_clamps_capacity() {
        let ids = (0..30).map(|i| i.to_string()).collect();
        assert_eq!(CooldownMemory::from_ids(ids).len(), COOLDOWN_CAPACITY);
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity_and_newest_first(
            batches in prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 0..8), 1..12)
        ) {
            let mut memory = CooldownMemory::new();
            for batch in &batches {
                memory.record_seen(batch.iter().cloned());
                prop_assert!(memory.len() <= COOLDOWN_CAPACITY);
                if let Some(first) = batch.first() {
                    prop_assert_eq!(&memory.ids()[0], first);
                }
            }
        }
    }
}
