use std::sync::Arc;

use crate::recommendations::engine::RecommendationEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Recommendation engine over whichever store was wired at startup.
    pub engine: Arc<RecommendationEngine>,
}
