use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to run the matcher over stored jobs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchJobsRequest {
    #[serde(default = "default_limit")]
    pub limit: u16,
    /// Persist scores back to the jobs table (on by default).
    #[serde(default = "default_true")]
    #[serde(alias = "persistScores", rename = "persistScores")]
    pub persist_scores: bool,
}

impl Default for MatchJobsRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            persist_scores: true,
        }
    }
}

fn default_limit() -> u16 {
    50
}

fn default_true() -> bool {
    true
}

/// Request to generate a proposal for a stored job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComposeProposalRequest {
    #[validate(length(min = 1))]
    pub uid: String,
    /// Regenerate even when a proposal for this job already exists.
    #[serde(default)]
    pub force: bool,
}
