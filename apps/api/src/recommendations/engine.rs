//! Recommendation engine — regenerates and reads back ranked candidates for a job.
//!
//! Flow: lock job → fetch job → fetch applicants → score each → atomic replace → unlock.
//! Reading always regenerates first so the ranking reflects current applicant state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::errors::RecommendationError;
use crate::models::recommendation::{NewRecommendation, RankedCandidate};
use crate::recommendations::locks::JobLocks;
use crate::recommendations::scoring::{score_applicant, ScoringWeights};
use crate::recommendations::store::RecommendationStore;

pub struct RecommendationEngine {
    store: Arc<dyn RecommendationStore>,
    weights: ScoringWeights,
    locks: JobLocks,
    /// Optional bound on `get_recommendations`.
    deadline: Option<Duration>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        Self {
            store,
            weights: ScoringWeights::default(),
            locks: JobLocks::new(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Recomputes every recommendation for `job_id` and replaces the stored set.
    ///
    /// Returns the number of rows written. Runs for the same job are serialised;
    /// a failed replace leaves the previous rows in place.
    pub async fn generate_recommendations(
        &self,
        job_id: i32,
    ) -> Result<usize, RecommendationError> {
        let _guard = self.locks.acquire(job_id).await;
        let started = Instant::now();

        let job = self
            .store
            .fetch_job(job_id)
            .await?
            .ok_or(RecommendationError::JobNotFound(job_id))?;

        let applicants = self.store.fetch_applicants_with_skills(job_id).await?;

        let rows: Vec<NewRecommendation> = applicants
            .iter()
            .map(|applicant| NewRecommendation {
                candidate_id: applicant.candidate_id,
                scores: score_applicant(&job, applicant, &self.weights),
            })
            .collect();

        if let Err(e) = self.store.replace_recommendations(job_id, &rows).await {
            warn!("Replacing recommendations for job {job_id} failed, previous set kept: {e}");
            return Err(e.into());
        }

        info!(
            "Generated {} recommendations for job {job_id} in {:?}",
            rows.len(),
            started.elapsed()
        );
        Ok(rows.len())
    }

    /// Regenerates, then returns the job's candidates best match first
    /// (ties broken by candidate id). Bounded by the configured deadline, if any.
    pub async fn get_recommendations(
        &self,
        job_id: i32,
    ) -> Result<Vec<RankedCandidate>, RecommendationError> {
        match self.deadline {
            Some(limit) => tokio::time::timeout(limit, self.generate_then_read(job_id))
                .await
                .map_err(|_| RecommendationError::Timeout(limit))?,
            None => self.generate_then_read(job_id).await,
        }
    }

    async fn generate_then_read(
        &self,
        job_id: i32,
    ) -> Result<Vec<RankedCandidate>, RecommendationError> {
        self.generate_recommendations(job_id).await?;
        let ranked = self.store.fetch_ranked_recommendations(job_id).await?;
        Ok(ranked)
    }
}
