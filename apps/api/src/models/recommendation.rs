use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The four dimension scores and their weighted composite, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScores {
    pub skill: f64,
    pub location: f64,
    pub experience: f64,
    pub cgpa: f64,
    pub overall: f64,
}

/// A scored (job, candidate) pair ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecommendation {
    pub candidate_id: i32,
    pub scores: MatchScores,
}

/// One row of the ranked read-back, joined with the candidate's profile.
/// Identity fields are nullable because candidate profiles may be incomplete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankedCandidate {
    pub recommendation_id: i32,
    pub job_id: i32,
    pub candidate_id: i32,
    pub f_name: Option<String>,
    pub l_name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub cgpa: Option<f64>,
    pub experience_years: Option<f64>,
    pub skills: Vec<String>,
    pub match_score: f64,
    pub skill_match_score: f64,
    pub location_match_score: f64,
    pub experience_match_score: f64,
    pub cgpa_match_score: f64,
    pub created_at: DateTime<Utc>,
}
