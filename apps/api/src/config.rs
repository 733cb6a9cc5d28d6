use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::scoring::engine::ScoringWeights;

const DEFAULT_MAX_CONTENT_LENGTH: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON skill list; the bundled list is used when unset.
    pub skills_file: Option<PathBuf>,
    /// Ceiling for caller-supplied fuzzy distances, and the tagger's distance.
    pub fuzzy_max_distance: usize,
    pub max_content_length: usize,
    pub cors_origins: Vec<String>,
    /// Component weights, in reporting order. Must be non-negative and sum to 1.0.
    pub scoring_weights: ScoringWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            skills_file: None,
            fuzzy_max_distance: 1,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            cors_origins: vec!["http://localhost:3000".to_string()],
            scoring_weights: ScoringWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            skills_file: lookup("SKILLS_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            fuzzy_max_distance: parse_or(&lookup, "FUZZY_MAX_DISTANCE", defaults.fuzzy_max_distance)
                .context("FUZZY_MAX_DISTANCE must be a non-negative integer")?,
            max_content_length: parse_or(&lookup, "MAX_CONTENT_LENGTH", defaults.max_content_length)
                .context("MAX_CONTENT_LENGTH must be a byte count")?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            scoring_weights: match lookup("SCORING_WEIGHTS") {
                Some(raw) => parse_weights(&raw)
                    .with_context(|| format!("Invalid SCORING_WEIGHTS '{raw}'"))?,
                None => defaults.scoring_weights,
            },
        })
    }
}

/// Five comma-separated weights: skills, keywords, experience, education, format.
fn parse_weights(raw: &str) -> Result<ScoringWeights> {
    let values = raw
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()?;
    let [skills_match, keyword_density, experience_match, education_match, format_score] =
        values[..]
    else {
        bail!("expected 5 weights, got {}", values.len());
    };
    let weights = ScoringWeights {
        skills_match,
        keyword_density,
        experience_match,
        education_match,
        format_score,
    };
    weights.validate()?;
    Ok(weights)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
