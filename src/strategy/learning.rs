//! Experience bookkeeping shared by the learning strategies.

use log::{debug, info, warn};

use crate::core::Outcome;
use crate::error::Result;
use crate::experience::{ExperienceStorage, ExperienceStore, Record};

/// An experience table, where it persists, and the keys touched this game.
pub struct Learning {
    store: ExperienceStore,
    storage: Option<Box<dyn ExperienceStorage>>,
    history: Vec<String>,
    out_of_range: usize,
}

impl Default for Learning {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for Learning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Learning")
            .field("records", &self.store.len())
            .field("storage", &self.storage.as_ref().map(|s| s.describe()))
            .field("history", &self.history)
            .field("out_of_range", &self.out_of_range)
            .finish()
    }
}

impl Learning {
    /// Table that lives only as long as the strategy.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: ExperienceStore::new(),
            storage: None,
            history: Vec::new(),
            out_of_range: 0,
        }
    }

    /// Table loaded from `storage` and saved back to it on `persist`.
    pub fn open(storage: Box<dyn ExperienceStorage>) -> Result<Self> {
        let mut store = ExperienceStore::new();
        let report = storage.load_into(&mut store)?;
        info!(
            "opened experience at {} ({} records, {} skipped)",
            storage.describe(),
            report.loaded,
            report.skipped
        );
        Ok(Self {
            store,
            storage: Some(storage),
            history: Vec::new(),
            out_of_range: 0,
        })
    }

    #[must_use]
    pub fn store(&self) -> &ExperienceStore {
        &self.store
    }

    /// Record for `key`, created if new.
    pub fn lookup(&mut self, key: &str) -> Record {
        self.store.get(key)
    }

    /// Remember that `key` was chosen in the current game.
    pub fn remember(&mut self, key: String) {
        self.store.get(&key);
        self.history.push(key);
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply `outcome` to every key of the finished game and start a new history.
    ///
    /// Every key is updated even when some land out of range. Returns how
    /// many did; they also add to `out_of_range`.
    pub fn settle(&mut self, outcome: Outcome) -> usize {
        debug!("settling {} moves as {:?}", self.history.len(), outcome);
        let mut bad = 0;
        for key in std::mem::take(&mut self.history) {
            if self.store.update(&key, outcome).is_err() {
                bad += 1;
            }
        }
        if bad > 0 {
            self.out_of_range += bad;
            warn!(
                "{} experience scores left [0, 1] this game ({} in total)",
                bad, self.out_of_range
            );
        }
        bad
    }

    /// Out-of-range score updates seen since the table was opened.
    #[must_use]
    pub fn out_of_range(&self) -> usize {
        self.out_of_range
    }

    /// Save the table if it has a storage.
    pub fn persist(&self) -> Result<()> {
        match &self.storage {
            Some(storage) => storage.save(&self.store),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::InMemoryStorage;

    #[test]
    fn test_settle_updates_history() {
        let mut learning = Learning::in_memory();
        learning.remember("a".to_string());
        learning.remember("b".to_string());
        learning.settle(Outcome::Win);

        assert!(learning.history().is_empty());
        assert_eq!(learning.store().peek("a").unwrap().wins, 1);
        assert_eq!(learning.store().peek("b").unwrap().wins, 1);
    }

    #[test]
    fn test_settle_counts_out_of_range() {
        // With a blend rate above 1 a loss from 0.5 overshoots below 0;
        // a loss from 0 stays at 0.
        let mut store = ExperienceStore::with_alpha(1.5);
        store.insert("a", Record::new(0, 1, 0, 0.0));
        let mut learning = Learning {
            store,
            storage: None,
            history: Vec::new(),
            out_of_range: 0,
        };
        learning.remember("a".to_string());
        learning.remember("b".to_string());

        assert_eq!(learning.settle(Outcome::Loss), 1);
        assert_eq!(learning.out_of_range(), 1);
        assert_eq!(learning.store().peek("a").unwrap().losses, 2);
        assert_eq!(learning.store().peek("b").unwrap().losses, 1);
    }

    #[test]
    fn test_open_and_persist() {
        let storage = InMemoryStorage::with_contents("a#1-0-0#0.6\n");
        let mut learning = Learning::open(Box::new(storage.clone())).unwrap();
        assert_eq!(learning.lookup("a").wins, 1);

        learning.remember("a".to_string());
        learning.settle(Outcome::Loss);
        learning.persist().unwrap();

        assert!(storage.contents().starts_with("a#1-1-0#0.48"));
    }
}
