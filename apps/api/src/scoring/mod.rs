// ATS scoring: profile models, TF-IDF keyword similarity, experience-years
// extraction, and the weighted engine that combines them.

pub mod engine;
pub mod experience;
pub mod handlers;
pub mod models;
pub mod stop_words;
pub mod tfidf;

pub use engine::{AtsScorer, ScoringEngine};
pub use models::{JobProfile, ResumeProfile, ScoreResult};
