use std::path::Path;

use config::{Config, File};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating a preference profile.
///
/// These are configuration errors: they surface once at load time and are
/// fatal to the run, never deferred into per-job scoring.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to load preference profile: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to parse preference document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing required preference key: 'threshold' or 'match_threshold'")]
    MissingThreshold,
}

/// Per-criterion scoring weights. They need not sum to 100 in config;
/// `normalized()` rescales them so the effective weights always do.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CriterionWeights {
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_required_skills_weight")]
    pub required_skills: f64,
    #[serde(default = "default_nice_to_have_weight")]
    pub nice_to_have_skills: f64,
    #[serde(default = "default_budget_fit_weight")]
    pub budget_fit: f64,
    #[serde(default = "default_client_quality_weight")]
    pub client_quality: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            category: default_category_weight(),
            required_skills: default_required_skills_weight(),
            nice_to_have_skills: default_nice_to_have_weight(),
            budget_fit: default_budget_fit_weight(),
            client_quality: default_client_quality_weight(),
        }
    }
}

fn default_category_weight() -> f64 { 30.0 }
fn default_required_skills_weight() -> f64 { 25.0 }
fn default_nice_to_have_weight() -> f64 { 10.0 }
fn default_budget_fit_weight() -> f64 { 20.0 }
fn default_client_quality_weight() -> f64 { 15.0 }

impl CriterionWeights {
    pub fn sum(&self) -> f64 {
        self.category
            + self.required_skills
            + self.nice_to_have_skills
            + self.budget_fit
            + self.client_quality
    }

    /// Rescale so the five weights sum to exactly 100. Applied even when only
    /// some weights are customized. A non-positive sum is left untouched.
    pub fn normalized(&self) -> CriterionWeights {
        let total = self.sum();
        if total <= 0.0 || (total - 100.0).abs() < f64::EPSILON {
            return *self;
        }
        let factor = 100.0 / total;
        CriterionWeights {
            category: self.category * factor,
            required_skills: self.required_skills * factor,
            nice_to_have_skills: self.nice_to_have_skills * factor,
            budget_fit: self.budget_fit * factor,
            client_quality: self.client_quality * factor,
        }
    }
}

/// Preferred budget bounds with flexibility multipliers for the "near range"
/// band.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BudgetPrefs {
    #[serde(default = "default_fixed_min")]
    pub fixed_min: f64,
    #[serde(default = "default_fixed_max")]
    pub fixed_max: f64,
    #[serde(default = "default_hourly_min")]
    pub hourly_min: f64,
    #[serde(default = "default_flexibility_low")]
    pub flexibility_low: f64,
    #[serde(default = "default_flexibility_high")]
    pub flexibility_high: f64,
}

fn default_fixed_min() -> f64 { 1000.0 }
fn default_fixed_max() -> f64 { 10000.0 }
fn default_hourly_min() -> f64 { 40.0 }
fn default_flexibility_low() -> f64 { 0.8 }
fn default_flexibility_high() -> f64 { 1.5 }

/// Client-quality thresholds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ClientCriteria {
    #[serde(default = "default_true")]
    pub payment_verified: bool,
    #[serde(default = "default_min_total_spent")]
    pub min_total_spent: f64,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
}

fn default_true() -> bool { true }
fn default_min_total_spent() -> f64 { 1000.0 }
fn default_min_rating() -> f64 { 4.5 }

/// Nested exclusion block, the alternative to a flat `exclusion_keywords`
/// list. Both config shapes are in the wild.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExclusionPrefs {
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A user's job preference profile. Loaded once per run (DB document first,
/// YAML file fallback) and immutable during a scoring pass.
///
/// `categories`, `required_skills`, `budget` and `client_criteria` are
/// required sections; a document missing any of them fails deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceProfile {
    pub categories: Vec<String>,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    pub budget: BudgetPrefs,
    pub client_criteria: ClientCriteria,
    #[serde(default)]
    pub exclusion_keywords: Vec<String>,
    #[serde(default)]
    pub exclusions: Option<ExclusionPrefs>,
    #[serde(default)]
    pub weights: CriterionWeights,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub match_threshold: Option<f64>,
    #[serde(default = "default_relax_thresholds")]
    pub auto_relax_thresholds: Vec<f64>,
}

fn default_relax_thresholds() -> Vec<f64> {
    vec![50.0, 30.0]
}

impl PreferenceProfile {
    /// Load the profile from a YAML/TOML file. The document may either be
    /// the profile itself or wrap it under a top-level `preferences` key.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreferenceError> {
        let cfg = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        let profile = match cfg.get::<PreferenceProfile>("preferences") {
            Ok(profile) => profile,
            Err(_) => cfg.try_deserialize()?,
        };

        profile.validate()?;
        Ok(profile)
    }

    /// Build the profile from a JSON document (the DB-backed settings table).
    /// Accepts the same optional `preferences` wrapper as the file loader.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PreferenceError> {
        let inner = match value.get("preferences") {
            Some(inner) => inner.clone(),
            None => value,
        };
        let profile: PreferenceProfile = serde_json::from_value(inner)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Validate cross-field requirements that serde cannot express.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.threshold.is_none() && self.match_threshold.is_none() {
            return Err(PreferenceError::MissingThreshold);
        }
        Ok(())
    }

    /// Match threshold, preferring the more specific `match_threshold` key
    /// over the legacy `threshold` key.
    pub fn effective_threshold(&self, fallback: f64) -> f64 {
        self.match_threshold.or(self.threshold).unwrap_or(fallback)
    }

    /// Exclusion keywords from either config shape. The flat list wins when
    /// both are present.
    pub fn exclusion_list(&self) -> &[String] {
        if !self.exclusion_keywords.is_empty() {
            return &self.exclusion_keywords;
        }
        match &self.exclusions {
            Some(exclusions) => &exclusions.keywords,
            None => &[],
        }
    }
}
