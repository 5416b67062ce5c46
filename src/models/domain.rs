use serde::{Deserialize, Serialize};

use crate::core::fields;

/// Job pricing model. Scraped records carry it as free text, so anything
/// unrecognized collapses to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Fixed,
    Hourly,
    Unknown,
}

/// A scraped job record with derived fields (category, match score).
///
/// `skills`, `key_tools` and `categories` are JSON-array-encoded strings
/// exactly as they arrive from the scraper; use the accessor methods instead
/// of parsing them inline.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobRecord {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
    #[serde(rename = "fixedPrice", default)]
    pub fixed_price: Option<f64>,
    #[serde(rename = "hourlyRateMin", default)]
    pub hourly_rate_min: Option<f64>,
    #[serde(rename = "hourlyRateMax", default)]
    pub hourly_rate_max: Option<f64>,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(rename = "keyTools", default)]
    pub key_tools: Option<String>,
    #[serde(rename = "clientCountry", default)]
    pub client_country: Option<String>,
    #[serde(rename = "clientTotalSpent", default)]
    pub client_total_spent: Option<String>,
    #[serde(rename = "clientRating", default)]
    pub client_rating: Option<String>,
    #[serde(rename = "clientInfoRaw", default)]
    pub client_info_raw: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(rename = "categoryConfidence", default)]
    pub category_confidence: Option<f64>,
    #[serde(rename = "matchScore", default)]
    pub match_score: Option<f64>,
    #[serde(rename = "matchReasons", default)]
    pub match_reasons: Option<String>,
}

impl JobRecord {
    /// Pricing model, defaulting to `Unknown` for anything unrecognized.
    pub fn job_type(&self) -> JobType {
        match self.job_type.as_deref() {
            Some("Fixed") => JobType::Fixed,
            Some("Hourly") => JobType::Hourly,
            _ => JobType::Unknown,
        }
    }

    /// Skills as a list; malformed JSON becomes an empty list.
    pub fn skill_list(&self) -> Vec<String> {
        fields::parse_string_list(self.skills.as_deref())
    }

    /// Key tools as a list; malformed JSON becomes an empty list.
    pub fn tool_list(&self) -> Vec<String> {
        fields::parse_string_list(self.key_tools.as_deref())
    }

    /// Union of the JSON-array `categories` field and the bare `category`
    /// field, in that order. Empty when neither is set.
    pub fn category_candidates(&self) -> Vec<String> {
        let mut candidates = fields::parse_string_list(self.categories.as_deref());
        if let Some(category) = self.category.as_deref() {
            if !category.is_empty() {
                candidates.push(category.to_string());
            }
        }
        candidates
    }
}

/// One criterion's contribution to a match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReason {
    pub criterion: String,
    pub weight: f64,
    pub score: f64,
    pub detail: String,
}

impl MatchReason {
    pub fn new(criterion: &str, weight: f64, score: f64, detail: String) -> Self {
        Self {
            criterion: criterion.to_string(),
            weight,
            score,
            detail,
        }
    }
}

/// A job that cleared (or was scored for) matching, with its explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredJob {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<MatchReason>,
}

impl ScoredJob {
    pub fn from_job(job: &JobRecord, match_score: f64, match_reasons: Vec<MatchReason>) -> Self {
        Self {
            uid: job.uid.clone(),
            title: job.title.clone(),
            url: job.url.clone(),
            job_type: job.job_type.clone(),
            category: job.category.clone(),
            match_score,
            match_reasons,
        }
    }
}
