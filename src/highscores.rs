//! Persisted high score
//!
//! Read once at session start, written back whenever the best score rises.

use crate::persistence::ScoreStore;

pub struct HighScoreTracker {
    store: Box<dyn ScoreStore>,
    /// Last value handed to the store
    saved: u64,
}

impl HighScoreTracker {
    /// Load the stored high score
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let saved = store.load();
        Self { store, saved }
    }

    /// Best score known to the store
    pub fn best(&self) -> u64 {
        self.saved
    }

    /// Save `score` if it beats the stored value. Returns true on a new record.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.saved {
            return false;
        }
        self.saved = score;
        self.store.save(score);
        true
    }
}

impl std::fmt::Debug for HighScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScoreTracker")
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_loads_existing() {
        let tracker = HighScoreTracker::load(Box::new(MemoryStore::with_contents("640")));
        assert_eq!(tracker.best(), 640);
    }

    #[test]
    fn test_malformed_store_starts_at_zero() {
        let tracker = HighScoreTracker::load(Box::new(MemoryStore::with_contents("x9")));
        assert_eq!(tracker.best(), 0);
    }

    #[test]
    fn test_only_saves_records() {
        let store = MemoryStore::with_contents("500");
        let mut tracker = HighScoreTracker::load(Box::new(store.clone()));
        assert!(!tracker.submit(400));
        assert!(!tracker.submit(500));
        assert_eq!(store.contents().as_deref(), Some("500"));
        assert!(tracker.submit(720));
        assert_eq!(store.contents().as_deref(), Some("720"));
    }

    #[test]
    fn test_failed_write_keeps_in_memory_best() {
        let mut store = MemoryStore::default();
        store.fail_writes = true;
        let mut tracker = HighScoreTracker::load(Box::new(store.clone()));
        assert!(tracker.submit(300));
        assert_eq!(tracker.best(), 300);
        assert_eq!(store.contents(), None);
    }

    proptest! {
        #[test]
        fn prop_best_never_decreases(scores in proptest::collection::vec(0u64..10_000, 0..40)) {
            let mut tracker = HighScoreTracker::load(Box::new(MemoryStore::default()));
            let mut last = tracker.best();
            for score in scores {
                tracker.submit(score);
                prop_assert!(tracker.best() >= last);
                prop_assert!(tracker.best() >= score);
                last = tracker.best();
            }
        }
    }
}
