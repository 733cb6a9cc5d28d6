//! Axum route handlers for the Skills API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::skills::{DictionaryError, FuzzyMatch, SkillEntry, SkillRecord};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub count: usize,
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SkillSearchQuery {
    pub q: String,
    pub max_distance: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SkillSearchResponse {
    pub query: String,
    pub exact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub matches: Vec<FuzzyMatch>,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillsRequest {
    pub skills: Vec<SkillRecord>,
}

#[derive(Debug, Serialize)]
pub struct AddSkillsResponse {
    pub inserted: usize,
    pub skipped: usize,
    pub total: usize,
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillListResponse> {
    let dictionary = state.dictionary.snapshot();
    Json(SkillListResponse {
        count: dictionary.len(),
        skills: dictionary.entries().collect(),
    })
}

/// GET /api/v1/skills/search?q=&max_distance=
///
/// `max_distance` defaults to, and may not exceed, the configured ceiling.
pub async fn handle_search_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillSearchQuery>,
) -> Result<Json<SkillSearchResponse>, AppError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::Validation("q cannot be empty".to_string()));
    }

    let ceiling = state.config.fuzzy_max_distance;
    let max_distance = params.max_distance.unwrap_or(ceiling);
    if max_distance > ceiling {
        return Err(AppError::Validation(format!(
            "max_distance cannot exceed {ceiling}"
        )));
    }

    let dictionary = state.dictionary.snapshot();
    Ok(Json(SkillSearchResponse {
        query: query.to_string(),
        exact: dictionary.exact_match(query),
        category: dictionary.metadata(query).map(|m| m.category.clone()),
        matches: dictionary.fuzzy_search(query, max_distance),
    }))
}

/// POST /api/v1/skills
///
/// Adds skills at runtime by rebuilding the dictionary and swapping it in.
pub async fn handle_add_skills(
    State(state): State<AppState>,
    Json(request): Json<AddSkillsRequest>,
) -> Result<Json<AddSkillsResponse>, AppError> {
    if request.skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }
    if request.skills.iter().all(|record| record.term().trim().is_empty()) {
        return Err(DictionaryError::EmptyTerm.into());
    }

    let (report, total) = state.dictionary.extend(request.skills);
    Ok(Json(AddSkillsResponse {
        inserted: report.inserted,
        skipped: report.skipped,
        total,
    }))
}
