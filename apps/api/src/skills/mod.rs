// Skill dictionary: trie storage, typo-tolerant lookup, loading, and the
// shared handle carried in AppState.

pub mod fuzzy;
pub mod handlers;
pub mod loader;
pub mod shared;
pub mod trie;

use thiserror::Error;

pub use fuzzy::FuzzyMatch;
pub use loader::SkillRecord;
pub use shared::SharedDictionary;
pub use trie::{SkillDictionary, SkillEntry};

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Skill term cannot be empty")]
    EmptyTerm,

    #[error("Failed to read skill list: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid skill list JSON: {0}")]
    Json(#[from] serde_json::Error),
}
