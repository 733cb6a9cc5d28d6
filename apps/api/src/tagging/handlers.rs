//! Axum route handlers for resume analysis.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::scoring::ResumeProfile;
use crate::state::AppState;
use crate::tagging::{build_resume_profile, extract_contacts, ContactInfo};

const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub resume_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub profile: ResumeProfile,
    pub contacts: ContactInfo,
    pub text_preview: String,
}

/// POST /api/v1/resumes/analyze
///
/// Tags already-extracted resume text. The returned `profile` can be passed
/// straight to `/api/v1/score` as `resume_data`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let dictionary = state.dictionary.snapshot();
    let profile = build_resume_profile(
        &request.text,
        &dictionary,
        state.config.fuzzy_max_distance,
    );
    let contacts = extract_contacts(&request.text);

    Ok(Json(AnalyzeResponse {
        resume_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        text_preview: preview(&request.text),
        profile,
        contacts,
    }))
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "x".repeat(600);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
