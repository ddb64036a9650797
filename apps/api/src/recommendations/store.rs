//! Persistence port for the recommendation engine, plus its PostgreSQL adapter.
//!
//! The engine never touches a connection directly. `RecommendationEngine` owns an
//! `Arc<dyn RecommendationStore>`, so tests can run against an in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::candidate::Applicant;
use crate::models::job::JobRequirements;
use crate::models::recommendation::{NewRecommendation, RankedCandidate};

#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// The job with its aggregated required skills, or `None` if it does not exist.
    async fn fetch_job(&self, job_id: i32) -> Result<Option<JobRequirements>, sqlx::Error>;

    /// Every candidate with an application for the job, with aggregated skills.
    async fn fetch_applicants_with_skills(&self, job_id: i32)
        -> Result<Vec<Applicant>, sqlx::Error>;

    /// Atomically swaps the job's recommendation rows for `rows`.
    /// On error the previous rows must be left untouched.
    async fn replace_recommendations(
        &self,
        job_id: i32,
        rows: &[NewRecommendation],
    ) -> Result<(), sqlx::Error>;

    /// Stored recommendations for the job, best match first, ties by candidate id.
    async fn fetch_ranked_recommendations(
        &self,
        job_id: i32,
    ) -> Result<Vec<RankedCandidate>, sqlx::Error>;
}

/// `RecommendationStore` backed by the portal's PostgreSQL schema.
pub struct PgRecommendationStore {
    pool: PgPool,
}

impl PgRecommendationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    async fn fetch_job(&self, job_id: i32) -> Result<Option<JobRequirements>, sqlx::Error> {
        sqlx::query_as::<_, JobRequirements>(
            r#"
            SELECT
                j.job_id,
                j.location,
                j.experience_required,
                j.min_cgpa,
                COALESCE(
                    array_remove(ARRAY_AGG(DISTINCT rs.skill_name), NULL),
                    ARRAY[]::TEXT[]
                ) AS required_skills
            FROM job j
            LEFT JOIN required_skill rs ON j.job_id = rs.job_id
            WHERE j.job_id = $1
            GROUP BY j.job_id
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn fetch_applicants_with_skills(
        &self,
        job_id: i32,
    ) -> Result<Vec<Applicant>, sqlx::Error> {
        sqlx::query_as::<_, Applicant>(
            r#"
            SELECT
                c.candidate_id,
                c.location,
                c.cgpa,
                c.experience_years,
                COALESCE(
                    array_remove(ARRAY_AGG(DISTINCT s.skill_name), NULL),
                    ARRAY[]::TEXT[]
                ) AS skills
            FROM candidate c
            JOIN application a ON c.candidate_id = a.candidate_id
            LEFT JOIN skill s ON c.candidate_id = s.candidate_id
            WHERE a.job_id = $1
            GROUP BY c.candidate_id
            ORDER BY c.candidate_id
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn replace_recommendations(
        &self,
        job_id: i32,
        rows: &[NewRecommendation],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Serialises replacements of the same job across processes; released on commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(job_id))
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM recommendation WHERE job_id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO recommendation
                    (job_id, candidate_id, match_score, skill_match_score,
                     location_match_score, experience_match_score, cgpa_match_score)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(job_id)
            .bind(row.candidate_id)
            .bind(row.scores.overall)
            .bind(row.scores.skill)
            .bind(row.scores.location)
            .bind(row.scores.experience)
            .bind(row.scores.cgpa)
            .execute(&mut *tx)
            .await?;
        }

        // Dropping `tx` on an early return above rolls everything back.
        tx.commit().await?;

        debug!(
            "Replaced recommendations for job {job_id}: {deleted} removed, {} inserted",
            rows.len()
        );
        Ok(())
    }

    async fn fetch_ranked_recommendations(
        &self,
        job_id: i32,
    ) -> Result<Vec<RankedCandidate>, sqlx::Error> {
        sqlx::query_as::<_, RankedCandidate>(
            r#"
            SELECT
                r.recommendation_id,
                r.job_id,
                r.candidate_id,
                c.f_name,
                c.l_name,
                c.email,
                c.location,
                c.cgpa,
                c.experience_years,
                COALESCE(
                    array_remove(ARRAY_AGG(DISTINCT s.skill_name), NULL),
                    ARRAY[]::TEXT[]
                ) AS skills,
                r.match_score,
                r.skill_match_score,
                r.location_match_score,
                r.experience_match_score,
                r.cgpa_match_score,
                r.created_at
            FROM recommendation r
            JOIN candidate c ON r.candidate_id = c.candidate_id
            JOIN application a ON c.candidate_id = a.candidate_id AND a.job_id = r.job_id
            LEFT JOIN skill s ON c.candidate_id = s.candidate_id
            WHERE r.job_id = $1
            GROUP BY r.recommendation_id, c.candidate_id
            ORDER BY r.match_score DESC, r.candidate_id ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}
