pub mod health;

use axum::{routing::get, Router};

use crate::recommendations::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/jobs/:job_id/recommendations",
            get(handlers::handle_get_recommendations).post(handlers::handle_generate),
        )
        .with_state(state)
}
