// Candidate-to-job recommendation engine.
// Scores every applicant of a job on skills, location, experience and CGPA,
// persists one row per applicant and serves them back ranked.

pub mod engine;
pub mod handlers;
pub mod locks;
pub mod scoring;
pub mod store;

#[cfg(test)]
pub mod memory;
