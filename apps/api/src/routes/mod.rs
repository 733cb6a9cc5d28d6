pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scoring::handlers as scoring;
use crate::skills::handlers as skills;
use crate::state::AppState;
use crate::tagging::handlers as tagging;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_content_length;
    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route(
            "/api/v1/skills",
            get(skills::handle_list_skills).post(skills::handle_add_skills),
        )
        .route("/api/v1/skills/search", get(skills::handle_search_skills))
        // Resume analysis
        .route("/api/v1/resumes/analyze", post(tagging::handle_analyze))
        // ATS scoring
        .route("/api/v1/score", post(scoring::handle_score))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::scoring::ScoringEngine;
    use crate::skills::{SharedDictionary, SkillDictionary};

    fn test_state() -> AppState {
        let dictionary =
            SkillDictionary::from_json_str(r#"["python", "django", "sql", {"skill": "docker", "category": "devops"}]"#)
                .unwrap();
        AppState {
            config: Config::default(),
            dictionary: Arc::new(SharedDictionary::new(dictionary)),
            scorer: Arc::new(ScoringEngine::default()),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(build_router(test_state()), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_skills() {
        let (status, body) = send(build_router(test_state()), get_request("/api/v1/skills")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 4);
        let docker = body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["term"] == "docker")
            .unwrap();
        assert_eq!(docker["category"], "devops");
    }

    #[tokio::test]
    async fn test_search_skills_fuzzy() {
        let (status, body) = send(
            build_router(test_state()),
            get_request("/api/v1/skills/search?q=Pyhton&max_distance=1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exact"], false);
        // A transposition costs two edits, so nothing within one.
        assert_eq!(body["matches"], json!([]));

        let (_, body) = send(
            build_router(test_state()),
            get_request("/api/v1/skills/search?q=djang"),
        )
        .await;
        assert_eq!(body["matches"][0]["term"], "django");
        assert_eq!(body["matches"][0]["distance"], 1);
    }

    #[tokio::test]
    async fn test_search_rejects_distance_above_ceiling() {
        let (status, body) = send(
            build_router(test_state()),
            get_request("/api/v1/skills/search?q=rust&max_distance=5"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_search_reports_category_of_exact_hit() {
        let (_, body) = send(
            build_router(test_state()),
            get_request("/api/v1/skills/search?q=Docker&max_distance=0"),
        )
        .await;
        assert_eq!(body["exact"], true);
        assert_eq!(body["category"], "devops");

        let (_, body) = send(
            build_router(test_state()),
            get_request("/api/v1/skills/search?q=python&max_distance=0"),
        )
        .await;
        // Bare terms carry no metadata.
        assert_eq!(body["exact"], true);
        assert!(body["category"].is_null());
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        for uri in ["/api/v1/skills/search?q=", "/api/v1/skills/search?q=%20%20"] {
            let (status, body) = send(build_router(test_state()), get_request(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["message"], "q cannot be empty");
        }
    }

    #[tokio::test]
    async fn test_add_skills_rejects_empty_list() {
        let (status, body) = send(
            build_router(test_state()),
            post_json("/api/v1/skills", json!({"skills": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "skills cannot be empty");
    }

    #[tokio::test]
    async fn test_add_skills_rejects_only_blank_terms() {
        let state = test_state();
        let (status, body) = send(
            build_router(state.clone()),
            post_json("/api/v1/skills", json!({"skills": ["", "  ", {"skill": " "}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Skill term cannot be empty");
        assert_eq!(state.dictionary.snapshot().len(), 4);
    }

    #[tokio::test]
    async fn test_add_skills_is_visible_to_later_requests() {
        let state = test_state();
        let (status, body) = send(
            build_router(state.clone()),
            post_json("/api/v1/skills", json!({"skills": ["Rust", "", {"skill": "kafka"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inserted"], 2);
        assert_eq!(body["skipped"], 1);
        assert_eq!(body["total"], 6);

        let (_, body) = send(
            build_router(state),
            get_request("/api/v1/skills/search?q=rust&max_distance=0"),
        )
        .await;
        assert_eq!(body["exact"], true);
    }

    #[tokio::test]
    async fn test_analyze_resume() {
        let text = "Experience: 3 years of Python and Django. Education: Bachelor degree.";
        let (status, body) = send(
            build_router(test_state()),
            post_json("/api/v1/resumes/analyze", json!({ "text": text })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["skills"], json!(["python", "django"]));
        assert_eq!(body["profile"]["education"], json!(["Education: Bachelor degree"]));
        assert_eq!(body["text_preview"], text);
        assert!(body["resume_id"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_text() {
        let (status, _) = send(
            build_router(test_state()),
            post_json("/api/v1/resumes/analyze", json!({ "text": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_with_explicit_skills() {
        let request = json!({
            "resume_data": {
                "text": "Experience Education Skills",
                "skills": ["python", "flask"],
                "experience": ["5 years of experience", "2019-2022"],
                "education": []
            },
            "job_description": "Python developer",
            "skills": ["python", "django", "sql"],
            "min_experience": 4
        });
        let (status, body) = send(build_router(test_state()), post_json("/api/v1/score", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let components = &body["ats_score"]["component_scores"];
        assert_eq!(components["skills_match"], 33.33);
        assert_eq!(components["experience_match"], 100.0);
        assert_eq!(components["format_score"], 75.0);
        assert_eq!(body["scorer_backend"], "tfidf");
    }

    #[tokio::test]
    async fn test_score_tags_job_skills_when_omitted() {
        let request = json!({
            "resume_data": { "text": "Skills: python", "skills": ["python"] },
            "job_description": "We need Python and Docker."
        });
        let (status, body) = send(build_router(test_state()), post_json("/api/v1/score", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ats_score"]["component_scores"]["skills_match"], 50.0);
    }

    #[tokio::test]
    async fn test_score_requires_job_description() {
        let request = json!({
            "resume_data": { "text": "Python developer" },
            "job_description": ""
        });
        let (status, body) = send(build_router(test_state()), post_json("/api/v1/score", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing resume data or job description");
    }
}
