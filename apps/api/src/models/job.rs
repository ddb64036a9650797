use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job posting as seen by the scorer: its requirements plus the
/// aggregated, de-duplicated required-skill list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRequirements {
    pub job_id: i32,
    pub location: String,
    /// Free text as entered by the recruiter, e.g. "3" or "2+ years".
    pub experience_required: Option<String>,
    pub min_cgpa: Option<f64>,
    pub required_skills: Vec<String>,
}

impl JobRequirements {
    /// Required years of experience; 0 when absent or unparseable.
    pub fn required_years(&self) -> u32 {
        self.experience_required
            .as_deref()
            .map(parse_leading_years)
            .unwrap_or(0)
    }

    pub fn min_cgpa(&self) -> f64 {
        self.min_cgpa.unwrap_or(0.0)
    }
}

/// Reads the leading integer of a free-text experience field.
/// Leading whitespace and a sign are accepted; negatives clamp to 0.
fn parse_leading_years(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}
