use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate who applied to the job being scored, with aggregated skills.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Applicant {
    pub candidate_id: i32,
    pub location: Option<String>,
    pub cgpa: Option<f64>,
    pub experience_years: Option<f64>,
    pub skills: Vec<String>,
}

impl Applicant {
    pub fn cgpa(&self) -> f64 {
        self.cgpa.unwrap_or(0.0)
    }

    pub fn experience_years(&self) -> f64 {
        self.experience_years.unwrap_or(0.0)
    }
}
