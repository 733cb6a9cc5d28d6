//! Dictionary loading from the JSON skill list format.
//!
//! The file is an array whose items are either a bare string or an object
//! `{"skill": "...", "category": "..."}`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::skills::trie::{SkillDictionary, SkillMetadata};
use crate::skills::DictionaryError;

/// Category given to object records that omit one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Built-in skill list shipped with the service.
const BUILTIN_SKILLS: &str = include_str!("../../data/skills.json");

/// One record of the dictionary load format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillRecord {
    Bare(String),
    Detailed {
        skill: String,
        #[serde(default)]
        category: Option<String>,
    },
}

impl SkillRecord {
    pub fn term(&self) -> &str {
        match self {
            SkillRecord::Bare(term) => term,
            SkillRecord::Detailed { skill, .. } => skill,
        }
    }

    fn into_parts(self) -> (String, Option<SkillMetadata>) {
        match self {
            SkillRecord::Bare(term) => (term, None),
            SkillRecord::Detailed { skill, category } => {
                let category = category.as_deref().unwrap_or(DEFAULT_CATEGORY);
                (skill, Some(SkillMetadata::category(category)))
            }
        }
    }
}

/// Outcome of a bulk insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records that added a new term.
    pub inserted: usize,
    /// Records rejected because their term was empty.
    pub skipped: usize,
}

impl SkillDictionary {
    /// Inserts every record in order. Empty terms are skipped, not fatal.
    pub fn load_records(&mut self, records: impl IntoIterator<Item = SkillRecord>) -> LoadReport {
        let mut report = LoadReport::default();
        for record in records {
            let (term, metadata) = record.into_parts();
            match self.insert(term.trim(), metadata) {
                Ok(true) => report.inserted += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("Skipping skill record: {e}");
                    report.skipped += 1;
                }
            }
        }
        report
    }

    pub fn from_json_str(json: &str) -> Result<Self, DictionaryError> {
        let records: Vec<SkillRecord> = serde_json::from_str(json)?;
        let mut dictionary = SkillDictionary::new();
        dictionary.load_records(records);
        Ok(dictionary)
    }

    pub fn from_path(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path)?;
        let dictionary = Self::from_json_str(&json)?;
        info!(
            "Loaded {} skills from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// The dictionary built from the bundled skill list.
    pub fn builtin() -> Result<Self, DictionaryError> {
        let dictionary = Self::from_json_str(BUILTIN_SKILLS)?;
        info!("Loaded {} built-in skills", dictionary.len());
        Ok(dictionary)
    }
}
