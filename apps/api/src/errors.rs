use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the recommendation engine.
///
/// `JobNotFound` means "nothing to show"; `Persistence` and `Timeout`
/// mean "try again". Callers are expected to surface them differently.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Job {0} not found")]
    JobNotFound(i32),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Recommendation request exceeded its {0:?} deadline")]
    Timeout(Duration),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl From<RecommendationError> for AppError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::JobNotFound(job_id) => {
                AppError::NotFound(format!("Job {job_id} not found"))
            }
            RecommendationError::Persistence(e) => AppError::Database(e),
            e @ RecommendationError::Timeout(_) => AppError::Timeout(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Timeout(msg) => {
                tracing::warn!("Request timed out: {msg}");
                (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
