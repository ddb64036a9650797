//! Match scoring — four independent dimension calculators and their weighted composite.
//!
//! Every score is a percentage in [0, 100]. A requirement of zero (no required
//! skills, no required experience, no minimum CGPA) is trivially satisfied.

use crate::models::candidate::Applicant;
use crate::models::job::JobRequirements;
use crate::models::recommendation::MatchScores;

const FULL_MATCH: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub skill: f64,
    pub location: f64,
    pub experience: f64,
    pub cgpa: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            location: 0.2,
            experience: 0.2,
            cgpa: 0.2,
        }
    }
}

/// Share of required skills the candidate has, compared case-insensitively.
/// Each listed requirement counts toward the denominator, duplicates included.
pub fn skill_match(candidate_skills: &[String], required_skills: &[String]) -> f64 {
    if required_skills.is_empty() {
        return FULL_MATCH;
    }

    let owned: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
    let matched = required_skills
        .iter()
        .filter(|req| {
            let req = req.to_lowercase();
            owned.iter().any(|s| *s == req)
        })
        .count();

    (matched as f64 / required_skills.len() as f64) * FULL_MATCH
}

/// Binary location match: 100 on case-insensitive equality, otherwise 0.
pub fn location_match(candidate_location: Option<&str>, job_location: &str) -> f64 {
    match candidate_location {
        Some(loc) if loc.to_lowercase() == job_location.to_lowercase() => FULL_MATCH,
        _ => 0.0,
    }
}

/// Linear partial credit up to the required years.
pub fn experience_match(candidate_years: f64, required_years: u32) -> f64 {
    proportional_match(candidate_years, f64::from(required_years))
}

/// Linear partial credit up to the minimum CGPA.
pub fn cgpa_match(candidate_cgpa: f64, min_cgpa: f64) -> f64 {
    proportional_match(candidate_cgpa, min_cgpa)
}

/// Shared rule for threshold dimensions: a non-positive threshold is
/// trivially met; meeting it scores 100; otherwise the ratio scaled to 100.
/// Non-finite values (e.g. NaN stored in a float column) count as absent:
/// a threshold as no requirement, an actual value as 0.
fn proportional_match(actual: f64, threshold: f64) -> f64 {
    let actual = if actual.is_finite() { actual } else { 0.0 };
    if !threshold.is_finite() || threshold <= 0.0 || actual >= threshold {
        return FULL_MATCH;
    }
    ((actual / threshold) * FULL_MATCH).clamp(0.0, FULL_MATCH)
}

/// Weighted composite of the four dimensions.
pub fn compute_overall(
    skill: f64,
    location: f64,
    experience: f64,
    cgpa: f64,
    weights: &ScoringWeights,
) -> f64 {
    weights.skill * skill
        + weights.location * location
        + weights.experience * experience
        + weights.cgpa * cgpa
}

/// Scores one applicant against a job on every dimension.
pub fn score_applicant(
    job: &JobRequirements,
    applicant: &Applicant,
    weights: &ScoringWeights,
) -> MatchScores {
    let skill = skill_match(&applicant.skills, &job.required_skills);
    let location = location_match(applicant.location.as_deref(), &job.location);
    let experience = experience_match(applicant.experience_years(), job.required_years());
    let cgpa = cgpa_match(applicant.cgpa(), job.min_cgpa());

    MatchScores {
        skill,
        location,
        experience,
        cgpa,
        overall: compute_overall(skill, location, experience, cgpa, weights),
    }
}
