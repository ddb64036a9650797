//! In-memory `RecommendationStore` for tests. Mirrors the PostgreSQL adapter's
//! observable behaviour: applicant-only pools, DISTINCT skills, atomic replace,
//! ranked read-back joined on live applications.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::candidate::Applicant;
use crate::models::job::JobRequirements;
use crate::models::recommendation::{MatchScores, NewRecommendation, RankedCandidate};
use crate::recommendations::store::RecommendationStore;

#[derive(Debug, Clone)]
pub struct StoredRecommendation {
    pub recommendation_id: i32,
    pub job_id: i32,
    pub candidate_id: i32,
    pub scores: MatchScores,
    pub created_at: DateTime<Utc>,
}

/// Name and contact details; every part may be missing on an incomplete profile.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub f_name: Option<String>,
    pub l_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Default)]
struct Tables {
    jobs: HashMap<i32, JobRequirements>,
    candidates: BTreeMap<i32, Applicant>,
    identities: HashMap<i32, Identity>,
    applications: BTreeSet<(i32, i32)>,
    recommendations: Vec<StoredRecommendation>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    next_id: AtomicI32,
    fail_next_replace: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl InMemoryStore {
    pub fn add_job(&self, job: JobRequirements) {
        self.tables.lock().unwrap().jobs.insert(job.job_id, job);
    }

    pub fn add_candidate(&self, applicant: Applicant) {
        self.tables
            .lock()
            .unwrap()
            .candidates
            .insert(applicant.candidate_id, applicant);
    }

    pub fn set_identity(&self, candidate_id: i32, identity: Identity) {
        self.tables
            .lock()
            .unwrap()
            .identities
            .insert(candidate_id, identity);
    }

    pub fn apply(&self, candidate_id: i32, job_id: i32) {
        self.tables
            .lock()
            .unwrap()
            .applications
            .insert((candidate_id, job_id));
    }

    pub fn withdraw(&self, candidate_id: i32, job_id: i32) {
        self.tables
            .lock()
            .unwrap()
            .applications
            .remove(&(candidate_id, job_id));
    }

    pub fn fail_next_replace(&self) {
        self.fail_next_replace.store(true, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    pub fn recommendations_for(&self, job_id: i32) -> Vec<StoredRecommendation> {
        self.tables
            .lock()
            .unwrap()
            .recommendations
            .iter()
            .filter(|r| r.job_id == job_id)
            .cloned()
            .collect()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn distinct(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[async_trait]
impl RecommendationStore for InMemoryStore {
    async fn fetch_job(&self, job_id: i32) -> Result<Option<JobRequirements>, sqlx::Error> {
        self.simulate_latency().await;
        let tables = self.tables.lock().unwrap();
        Ok(tables.jobs.get(&job_id).map(|job| JobRequirements {
            required_skills: distinct(&job.required_skills),
            ..job.clone()
        }))
    }

    async fn fetch_applicants_with_skills(
        &self,
        job_id: i32,
    ) -> Result<Vec<Applicant>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .candidates
            .values()
            .filter(|c| tables.applications.contains(&(c.candidate_id, job_id)))
            .map(|c| Applicant {
                skills: distinct(&c.skills),
                ..c.clone()
            })
            .collect())
    }

    async fn replace_recommendations(
        &self,
        job_id: i32,
        rows: &[NewRecommendation],
    ) -> Result<(), sqlx::Error> {
        let previous: Vec<StoredRecommendation> = {
            let mut tables = self.tables.lock().unwrap();
            let (removed, kept): (Vec<_>, Vec<_>) = tables
                .recommendations
                .drain(..)
                .partition(|r| r.job_id == job_id);
            tables.recommendations = kept;
            removed
        };

        // Delete and insert are separate steps here; only the caller's job lock
        // keeps concurrent runs from interleaving.
        tokio::task::yield_now().await;

        let mut tables = self.tables.lock().unwrap();
        if self.fail_next_replace.swap(false, Ordering::SeqCst) {
            // Roll back the delete, as the transaction in the PostgreSQL adapter does.
            tables.recommendations.extend(previous);
            return Err(sqlx::Error::Protocol("injected insert failure".to_string()));
        }
        for row in rows {
            tables.recommendations.push(StoredRecommendation {
                recommendation_id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                job_id,
                candidate_id: row.candidate_id,
                scores: row.scores,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn fetch_ranked_recommendations(
        &self,
        job_id: i32,
    ) -> Result<Vec<RankedCandidate>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let mut ranked: Vec<RankedCandidate> = tables
            .recommendations
            .iter()
            .filter(|r| r.job_id == job_id)
            .filter(|r| tables.applications.contains(&(r.candidate_id, job_id)))
            .filter_map(|r| {
                let c = tables.candidates.get(&r.candidate_id)?;
                let identity = tables
                    .identities
                    .get(&r.candidate_id)
                    .cloned()
                    .unwrap_or_default();
                Some(RankedCandidate {
                    recommendation_id: r.recommendation_id,
                    job_id,
                    candidate_id: r.candidate_id,
                    f_name: identity.f_name,
                    l_name: identity.l_name,
                    email: identity.email,
                    location: c.location.clone(),
                    cgpa: c.cgpa,
                    experience_years: c.experience_years,
                    skills: distinct(&c.skills),
                    match_score: r.scores.overall,
                    skill_match_score: r.scores.skill,
                    location_match_score: r.scores.location,
                    experience_match_score: r.scores.experience,
                    cgpa_match_score: r.scores.cgpa,
                    created_at: r.created_at,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.match_score
                .total_cmp(&a.match_score)
                .then(a.candidate_id.cmp(&b.candidate_id))
        });
        Ok(ranked)
    }
}

pub fn sample_job(
    job_id: i32,
    required: &[&str],
    location: &str,
    experience: &str,
    min_cgpa: f64,
) -> JobRequirements {
    JobRequirements {
        job_id,
        location: location.to_string(),
        experience_required: Some(experience.to_string()),
        min_cgpa: Some(min_cgpa),
        required_skills: required.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn sample_applicant(
    candidate_id: i32,
    skills: &[&str],
    location: Option<&str>,
    experience_years: f64,
    cgpa: f64,
) -> Applicant {
    Applicant {
        candidate_id,
        location: location.map(str::to_string),
        cgpa: Some(cgpa),
        experience_years: Some(experience_years),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}
