use std::sync::Arc;

use crate::config::Config;
use crate::scoring::AtsScorer;
use crate::skills::SharedDictionary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Build-once, read-many skill dictionary. Runtime additions rebuild and swap.
    pub dictionary: Arc<SharedDictionary>,
    /// Pluggable scorer. Default: ScoringEngine.
    pub scorer: Arc<dyn AtsScorer>,
}
