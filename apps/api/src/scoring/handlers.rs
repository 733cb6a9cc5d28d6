//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::scoring::{JobProfile, ResumeProfile, ScoreResult};
use crate::state::AppState;
use crate::tagging::extract_skills;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume_data: ResumeProfile,
    #[serde(default)]
    pub job_description: String,
    /// Required skills. When omitted they are tagged from the job description.
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub min_experience: u32,
    #[serde(default)]
    pub required_education: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub ats_score: ScoreResult,
    pub scorer_backend: String,
}

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.resume_data.is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing resume data or job description".to_string(),
        ));
    }

    let skills = match request.skills {
        Some(skills) => skills,
        None => {
            let dictionary = state.dictionary.snapshot();
            extract_skills(
                &request.job_description,
                &dictionary,
                state.config.fuzzy_max_distance,
            )
        }
    };

    let job = JobProfile {
        description: request.job_description,
        skills,
        min_experience: request.min_experience,
        required_education: request.required_education,
    };

    let ats_score = state.scorer.score(&request.resume_data, &job);
    info!(
        "ATS score computed: {} ({} job skills)",
        ats_score.total_score,
        job.skills.len()
    );

    Ok(Json(ScoreResponse {
        success: true,
        ats_score,
        scorer_backend: state.scorer.backend().to_string(),
    }))
}
