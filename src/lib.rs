//! Gigmatch - Job matching service for freelance job feeds
//!
//! This library scores scraped freelance jobs against a preference profile,
//! classifies them into a fixed category taxonomy, and grounds generated
//! proposals in the matching evidence.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{classify_job, score_job, Category, MatchOutcome, Matcher, Portfolio};
pub use models::{
    JobRecord, MatchJobsRequest, MatchJobsResponse, MatchReason, PreferenceProfile, ScoredJob,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let (category, confidence) = classify_job("", "", &[]);
        assert_eq!(category, Category::Other);
        assert_eq!(confidence, 0.3);
    }
}
