//! ATS scoring engine — blends five heuristics into one 0–100 score.
//!
//! | component        | weight |
//! |------------------|--------|
//! | skills_match     | 0.35   |
//! | keyword_density  | 0.25   |
//! | experience_match | 0.20   |
//! | education_match  | 0.10   |
//! | format_score     | 0.10   |
//!
//! Scoring never fails outward: `evaluate` reports a degraded outcome and
//! `calculate_score` turns that into `ScoreResult::zero()`.

use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::scoring::experience::total_years;
use crate::scoring::models::{Component, JobProfile, ResumeProfile, ScoreResult};
use crate::scoring::tfidf::{text_similarity, TfidfVectorizer};

const EDUCATION_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "degree", "certification"];
const FORMAT_SECTIONS: &[&str] = &["experience", "education", "skills", "contact"];

const SKILLS_THRESHOLD: f64 = 0.5;
const KEYWORD_THRESHOLD: f64 = 0.3;
const FORMAT_THRESHOLD: f64 = 0.7;
const EXPERIENCE_THRESHOLD: f64 = 0.6;

pub const RECOMMEND_SKILLS: &str = "Add more relevant skills mentioned in the job description.";
pub const RECOMMEND_KEYWORDS: &str =
    "Include more keywords from the job description in your resume.";
pub const RECOMMEND_FORMAT: &str =
    "Improve resume structure with clear sections (Experience, Education, Skills, Contact).";
pub const RECOMMEND_EXPERIENCE: &str =
    "Highlight more relevant work experience or years of experience.";

// ────────────────────────────────────────────────────────────────────────────
// Weights and outcome types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills_match: f64,
    pub keyword_density: f64,
    pub experience_match: f64,
    pub education_match: f64,
    pub format_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills_match: 0.35,
            keyword_density: 0.25,
            experience_match: 0.20,
            education_match: 0.10,
            format_score: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn weight(&self, component: Component) -> f64 {
        match component {
            Component::SkillsMatch => self.skills_match,
            Component::KeywordDensity => self.keyword_density,
            Component::ExperienceMatch => self.experience_match,
            Component::EducationMatch => self.education_match,
            Component::FormatScore => self.format_score,
        }
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let weights = Component::ALL.map(|c| self.weight(c));
        let valid = weights.iter().all(|w| w.is_finite() && *w >= 0.0)
            && (weights.iter().sum::<f64>() - 1.0).abs() <= 1e-6;
        if valid {
            Ok(())
        } else {
            Err(ScoringError::InvalidWeights)
        }
    }
}

/// Why a scoring call degraded to the zero result.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("Scoring weights must be finite, non-negative and sum to 1.0")]
    InvalidWeights,

    #[error("Component {} produced a value outside [0, 1]", .0.name())]
    ComponentOutOfRange(Component),

    #[error("Scoring panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, PartialEq)]
pub enum ScoreOutcome {
    Scored(ScoreResult),
    Degraded(ScoringError),
}

impl ScoreOutcome {
    pub fn into_result(self) -> ScoreResult {
        match self {
            ScoreOutcome::Scored(result) => result,
            ScoreOutcome::Degraded(reason) => {
                warn!("ATS scoring degraded to zero result: {reason}");
                ScoreResult::zero()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer trait
// ────────────────────────────────────────────────────────────────────────────

/// Scoring backend carried in `AppState` as `Arc<dyn AtsScorer>`.
pub trait AtsScorer: Send + Sync {
    fn score(&self, resume: &ResumeProfile, job: &JobProfile) -> ScoreResult;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// ScoringEngine
// ────────────────────────────────────────────────────────────────────────────

/// Stateless apart from configuration; the TF-IDF model is rebuilt per call.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
    vectorizer: TfidfVectorizer,
}

impl AtsScorer for ScoringEngine {
    fn score(&self, resume: &ResumeProfile, job: &JobProfile) -> ScoreResult {
        self.calculate_score(resume, job)
    }

    fn backend(&self) -> &'static str {
        "tfidf"
    }
}

impl ScoringEngine {
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self {
            weights,
            vectorizer: TfidfVectorizer::default(),
        }
    }

    /// Always returns a value; degraded outcomes become the zero result.
    pub fn calculate_score(&self, resume: &ResumeProfile, job: &JobProfile) -> ScoreResult {
        self.evaluate(resume, job).into_result()
    }

    pub fn evaluate(&self, resume: &ResumeProfile, job: &JobProfile) -> ScoreOutcome {
        guarded(|| self.try_score(resume, job))
    }

    fn try_score(
        &self,
        resume: &ResumeProfile,
        job: &JobProfile,
    ) -> Result<ScoreResult, ScoringError> {
        self.weights.validate()?;

        let mut raw: BTreeMap<Component, f64> = BTreeMap::new();
        raw.insert(
            Component::SkillsMatch,
            skills_match(&resume.skills, &job.skills),
        );
        raw.insert(
            Component::KeywordDensity,
            self.keyword_density(&resume.text, &job.description),
        );
        raw.insert(
            Component::ExperienceMatch,
            experience_match(&resume.experience, job.min_experience),
        );
        raw.insert(
            Component::EducationMatch,
            education_match(&resume.education, &job.required_education),
        );
        raw.insert(Component::FormatScore, format_score(&resume.text));

        for (component, value) in &raw {
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                return Err(ScoringError::ComponentOutOfRange(*component));
            }
        }

        let total: f64 = raw
            .iter()
            .map(|(component, value)| self.weights.weight(*component) * value)
            .sum();

        Ok(ScoreResult {
            total_score: round2(total * 100.0).clamp(0.0, 100.0),
            component_scores: raw
                .iter()
                .map(|(component, value)| (*component, round2(value * 100.0)))
                .collect(),
            recommendations: recommendations(&raw),
        })
    }

    /// Cosine similarity of TF-IDF vectors; 0.0 for empty input or a degenerate vocabulary.
    fn keyword_density(&self, resume_text: &str, job_description: &str) -> f64 {
        if resume_text.is_empty() || job_description.is_empty() {
            return 0.0;
        }
        match text_similarity(&self.vectorizer, resume_text, job_description) {
            Ok(similarity) => similarity,
            Err(e) => {
                debug!("Keyword density fell back to 0.0: {e}");
                0.0
            }
        }
    }
}

/// Runs a scoring attempt, turning both errors and panics into `Degraded`.
fn guarded<F>(attempt: F) -> ScoreOutcome
where
    F: FnOnce() -> Result<ScoreResult, ScoringError>,
{
    // Scoring only reads its inputs, so nothing is left half-updated by an unwind.
    match panic::catch_unwind(AssertUnwindSafe(attempt)) {
        Ok(Ok(result)) => ScoreOutcome::Scored(result),
        Ok(Err(reason)) => ScoreOutcome::Degraded(reason),
        Err(payload) => ScoreOutcome::Degraded(ScoringError::Panicked(panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Component heuristics
// ────────────────────────────────────────────────────────────────────────────

fn skills_match(resume_skills: &[String], job_skills: &[String]) -> f64 {
    if job_skills.is_empty() {
        return 1.0;
    }
    let resume: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let job: HashSet<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();
    resume.intersection(&job).count() as f64 / job_skills.len() as f64
}

fn experience_match(experience: &[String], required_years: u32) -> f64 {
    if required_years == 0 {
        return 1.0;
    }
    (total_years(experience) as f64 / required_years as f64).min(1.0)
}

fn education_match(education: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    if education.is_empty() {
        return 0.0;
    }
    let text = education.join(" ").to_lowercase();
    let matches = EDUCATION_KEYWORDS
        .iter()
        .filter(|kw| text.contains(*kw))
        .count();
    (matches as f64 / required.len() as f64).min(1.0)
}

fn format_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let found = FORMAT_SECTIONS
        .iter()
        .filter(|section| lower.contains(*section))
        .count();
    (found as f64 * 0.25).min(1.0)
}

/// Fixed-order advice; each entry fires on its own threshold.
fn recommendations(scores: &BTreeMap<Component, f64>) -> Vec<String> {
    let score = |c: Component| scores.get(&c).copied().unwrap_or(0.0);
    let checks = [
        (Component::SkillsMatch, SKILLS_THRESHOLD, RECOMMEND_SKILLS),
        (Component::KeywordDensity, KEYWORD_THRESHOLD, RECOMMEND_KEYWORDS),
        (Component::FormatScore, FORMAT_THRESHOLD, RECOMMEND_FORMAT),
        (Component::ExperienceMatch, EXPERIENCE_THRESHOLD, RECOMMEND_EXPERIENCE),
    ];
    checks
        .iter()
        .filter(|(component, threshold, _)| score(*component) < *threshold)
        .map(|(_, _, advice)| advice.to_string())
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
