mod config;
mod errors;
mod routes;
mod scoring;
mod skills;
mod state;
mod tagging;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::ScoringEngine;
use crate::skills::{SharedDictionary, SkillDictionary};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill dictionary once; later additions go through rebuild-and-swap.
    let dictionary = match &config.skills_file {
        Some(path) => SkillDictionary::from_path(path)
            .with_context(|| format!("Failed to load skills from {}", path.display()))?,
        None => SkillDictionary::builtin().context("Failed to load built-in skills")?,
    };
    if dictionary.is_empty() {
        warn!("Skill dictionary is empty; skill tagging will find nothing");
    }

    let state = AppState {
        config: config.clone(),
        dictionary: Arc::new(SharedDictionary::new(dictionary)),
        scorer: Arc::new(ScoringEngine::with_weights(config.scoring_weights.clone())),
    };
    info!(
        "Fuzzy matching up to distance {}, body limit {} bytes",
        config.fuzzy_max_distance, config.max_content_length
    );

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors_origins)),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `*` anywhere in the list allows every origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
