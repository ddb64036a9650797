//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::recommendation::RankedCandidate;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub job_id: i32,
    pub generated: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub job_id: i32,
    pub candidates: Vec<RankedCandidate>,
}

fn validate_job_id(job_id: i32) -> Result<i32, AppError> {
    if job_id <= 0 {
        return Err(AppError::Validation(format!(
            "job_id must be a positive integer, got {job_id}"
        )));
    }
    Ok(job_id)
}

/// POST /api/v1/jobs/:job_id/recommendations
///
/// Recomputes and stores the job's recommendations. Returns how many were written.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<GenerateResponse>, AppError> {
    let job_id = validate_job_id(job_id)?;
    let generated = state.engine.generate_recommendations(job_id).await?;
    Ok(Json(GenerateResponse { job_id, generated }))
}

/// GET /api/v1/jobs/:job_id/recommendations
///
/// Regenerates, then returns applicants ranked by overall match score.
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let job_id = validate_job_id(job_id)?;
    let candidates = state.engine.get_recommendations(job_id).await?;
    Ok(Json(RecommendationsResponse { job_id, candidates }))
}
