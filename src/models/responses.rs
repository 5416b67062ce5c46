use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchReason, ScoredJob};

/// Response for the batch matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchJobsResponse {
    pub matches: Vec<ScoredJob>,
    pub total_candidates: usize,
    pub effective_threshold: f64,
}

/// Response for the batch classification endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub total: usize,
    /// Jobs classified with confidence below 0.5.
    pub low_confidence: usize,
    /// Category label -> number of jobs assigned to it.
    pub distribution: BTreeMap<String, usize>,
}

/// Response for single-job scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreJobResponse {
    pub uid: String,
    pub title: String,
    pub match_score: f64,
    pub match_reasons: Vec<MatchReason>,
}

/// Response for proposal generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeProposalResponse {
    pub uid: String,
    pub proposal: String,
    pub model: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
