//! Shared, swappable dictionary handle.
//!
//! Readers take an `Arc` snapshot and never block on each other. Updates
//! rebuild a copy and swap it in, so a snapshot never changes underneath a
//! reader.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::skills::loader::{LoadReport, SkillRecord};
use crate::skills::trie::SkillDictionary;

#[derive(Debug, Default)]
pub struct SharedDictionary {
    current: RwLock<Arc<SkillDictionary>>,
}

impl SharedDictionary {
    pub fn new(dictionary: SkillDictionary) -> Self {
        Self {
            current: RwLock::new(Arc::new(dictionary)),
        }
    }

    /// The dictionary as of now. Later swaps do not affect the returned value.
    pub fn snapshot(&self) -> Arc<SkillDictionary> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Inserts `records` into a copy of the current dictionary and swaps it in.
    /// Returns the load report and the new term count.
    pub fn extend(&self, records: Vec<SkillRecord>) -> (LoadReport, usize) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = SkillDictionary::clone(&guard);
        let report = next.load_records(records);
        let total = next.len();
        *guard = Arc::new(next);
        info!(
            "Skill dictionary rebuilt: {} inserted, {} skipped, {} total",
            report.inserted, report.skipped, total
        );
        (report, total)
    }
}
