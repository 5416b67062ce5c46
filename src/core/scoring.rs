use std::collections::HashSet;

use crate::core::fields;
use crate::models::{BudgetPrefs, ClientCriteria, JobRecord, JobType, MatchReason, PreferenceProfile};

/// Marker substring that indicates a payment-verified client.
const VERIFIED_MARKER: &str = "Payment method verified";

/// Relative weights of the client-quality sub-signals before redistribution.
const VERIFIED_SUBWEIGHT: f64 = 0.4;
const SPEND_SUBWEIGHT: f64 = 0.3;
const RATING_SUBWEIGHT: f64 = 0.3;

/// Incrementally collected (score, weight) signals, blended with the weights
/// renormalized over just the signals actually present. Used wherever
/// partial/optional multi-signal scoring occurs.
#[derive(Debug, Default)]
pub struct SignalBlend {
    signals: Vec<(f64, f64)>,
}

impl SignalBlend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, score: f64, weight: f64) {
        self.signals.push((score, weight));
    }

    /// Weighted average over the available signals, or `None` when no signal
    /// was collected at all.
    pub fn blend(&self) -> Option<f64> {
        if self.signals.is_empty() {
            return None;
        }
        let total_weight: f64 = self.signals.iter().map(|(_, w)| w).sum();
        if total_weight <= 0.0 {
            return None;
        }
        Some(
            self.signals
                .iter()
                .map(|(score, weight)| score * weight / total_weight)
                .sum(),
        )
    }
}

/// Score a job against a preference profile on a 0-100 scale.
///
/// Five weighted criteria: category, required skills, nice-to-have skills,
/// budget fit, client quality. Weights are normalized to sum to 100. An
/// exclusion-keyword hit short-circuits everything with a score of 0 and a
/// single reason entry.
///
/// Pure and deterministic: same (job, preferences) always yields the same
/// (score, reasons). Malformed JSON in skills/categories is treated as empty,
/// never raised.
pub fn score_job(job: &JobRecord, preferences: &PreferenceProfile) -> (f64, Vec<MatchReason>) {
    if contains_exclusion_keyword(job, preferences) {
        return (
            0.0,
            vec![MatchReason::new(
                "exclusion",
                0.0,
                0.0,
                "Contains exclusion keyword (auto-rejected)".to_string(),
            )],
        );
    }

    let weights = preferences.weights.normalized();
    let mut reasons = Vec::with_capacity(5);
    let mut total_score = 0.0;

    // 1. Category match
    let (category_score, category_detail) = category_match(job, preferences);
    total_score += category_score * weights.category;
    reasons.push(MatchReason::new(
        "category",
        weights.category,
        category_score,
        category_detail,
    ));

    // 2. Required skills
    let job_skills: HashSet<String> = job
        .skill_list()
        .iter()
        .map(|s| s.to_lowercase().trim().to_string())
        .collect();

    let (required_score, required_detail) = skill_fraction(
        &job_skills,
        &preferences.required_skills,
        "No required skills configured",
        true,
    );
    total_score += required_score * weights.required_skills;
    reasons.push(MatchReason::new(
        "required_skills",
        weights.required_skills,
        required_score,
        required_detail,
    ));

    // 3. Nice-to-have skills
    let (nice_score, nice_detail) = skill_fraction(
        &job_skills,
        &preferences.nice_to_have_skills,
        "No nice-to-have skills configured",
        false,
    );
    total_score += nice_score * weights.nice_to_have_skills;
    reasons.push(MatchReason::new(
        "nice_to_have_skills",
        weights.nice_to_have_skills,
        nice_score,
        nice_detail,
    ));

    // 4. Budget fit
    let (budget_score, budget_detail) = budget_fit(job, &preferences.budget);
    total_score += budget_score * weights.budget_fit;
    reasons.push(MatchReason::new(
        "budget_fit",
        weights.budget_fit,
        budget_score,
        budget_detail,
    ));

    // 5. Client quality
    let (client_score, client_detail) = client_quality(job, &preferences.client_criteria);
    total_score += client_score * weights.client_quality;
    reasons.push(MatchReason::new(
        "client_quality",
        weights.client_quality,
        client_score,
        client_detail,
    ));

    (total_score.clamp(0.0, 100.0), reasons)
}

/// True when any configured exclusion keyword appears in title+description.
/// Skills are deliberately not searched.
fn contains_exclusion_keyword(job: &JobRecord, preferences: &PreferenceProfile) -> bool {
    let exclusions = preferences.exclusion_list();
    if exclusions.is_empty() {
        return false;
    }

    let text = format!(
        "{} {}",
        job.title.to_lowercase(),
        job.description.to_lowercase()
    );

    exclusions
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}

/// Case-insensitive bidirectional substring test of every job category
/// candidate against every preferred category. First match wins.
fn category_match(job: &JobRecord, preferences: &PreferenceProfile) -> (f64, String) {
    let candidates = job.category_candidates();
    if candidates.is_empty() {
        return (0.0, "No category assigned".to_string());
    }

    for candidate in &candidates {
        let candidate_norm = candidate.to_lowercase().trim().to_string();
        for preferred in &preferences.categories {
            let preferred_norm = preferred.to_lowercase().trim().to_string();
            if candidate_norm.contains(&preferred_norm) || preferred_norm.contains(&candidate_norm)
            {
                return (1.0, format!("{} (perfect match)", candidate));
            }
        }
    }

    (0.0, format!("{} (not in preferred list)", candidates[0]))
}

/// Fraction of wanted skills found in the job's skill set.
///
/// An empty wanted list scores 0.0 with an explanatory detail rather than
/// being skipped: its weight share contributes nothing instead of being
/// redistributed to the other criteria.
fn skill_fraction(
    job_skills: &HashSet<String>,
    wanted: &[String],
    empty_detail: &str,
    note_overflow: bool,
) -> (f64, String) {
    if wanted.is_empty() {
        return (0.0, empty_detail.to_string());
    }

    let wanted_norm: Vec<String> = wanted
        .iter()
        .map(|s| s.to_lowercase().trim().to_string())
        .collect();
    let matched: Vec<&String> = wanted_norm
        .iter()
        .filter(|skill| job_skills.contains(*skill))
        .collect();

    let score = matched.len() as f64 / wanted_norm.len() as f64;
    let mut detail = format!("{}/{} found", matched.len(), wanted_norm.len());
    if !matched.is_empty() {
        let shown: Vec<&str> = matched.iter().take(3).map(|s| s.as_str()).collect();
        detail.push_str(&format!(": {}", shown.join(", ")));
        if note_overflow && matched.len() > 3 {
            detail.push_str(&format!(" (+{} more)", matched.len() - 3));
        }
    }

    (score, detail)
}

/// Three-valued budget fit: 1.0 in range, 0.5 near range or unknown, 0.0 out.
///
/// The near-range band is asymmetric by configuration
/// (`price >= fixed_min * flexibility_low` OR
/// `price <= fixed_max * flexibility_high`); with the default multipliers it
/// accepts anything above 80% of the minimum.
fn budget_fit(job: &JobRecord, budget: &BudgetPrefs) -> (f64, String) {
    match job.job_type() {
        JobType::Fixed => {
            let Some(price) = job.fixed_price else {
                return (0.5, "Fixed price (amount not specified)".to_string());
            };
            if budget.fixed_min <= price && price <= budget.fixed_max {
                (
                    1.0,
                    format!(
                        "${:.0} fixed (within ${:.0}-${:.0} range)",
                        price, budget.fixed_min, budget.fixed_max
                    ),
                )
            } else if price >= budget.fixed_min * budget.flexibility_low
                || price <= budget.fixed_max * budget.flexibility_high
            {
                (0.5, format!("${:.0} fixed (near target range)", price))
            } else {
                (0.0, format!("${:.0} fixed (outside range)", price))
            }
        }
        JobType::Hourly => {
            let Some(rate) = job.hourly_rate_min else {
                return (0.5, "Hourly (rate not specified)".to_string());
            };
            if rate >= budget.hourly_min {
                (
                    1.0,
                    format!("${:.0}/hr (meets ${:.0}/hr minimum)", rate, budget.hourly_min),
                )
            } else if rate >= budget.hourly_min * budget.flexibility_low {
                (0.5, format!("${:.0}/hr (below target)", rate))
            } else {
                (0.0, format!("${:.0}/hr (too low)", rate))
            }
        }
        JobType::Unknown => (0.5, "Unknown job type (neutral)".to_string()),
    }
}

/// Client-quality blend over verification, spend, and rating sub-signals.
///
/// Unparseable spend/rating text excludes that sub-signal from the blend
/// (weight redistributed over the rest). Verification is always computed
/// from the info text, unverified scoring 0.0 — it is never treated as
/// missing. The single exception: with no info text and no parseable
/// spend or rating, the score is a neutral 0.5.
fn client_quality(job: &JobRecord, criteria: &ClientCriteria) -> (f64, String) {
    let info = job.client_info_raw.as_deref().unwrap_or("");
    let spent_raw = job.client_total_spent.as_deref().unwrap_or("");
    let rating_raw = job.client_rating.as_deref().unwrap_or("");

    let verified = if info.contains(VERIFIED_MARKER) { 1.0 } else { 0.0 };

    let parsed_spent = fields::parse_client_spent(spent_raw);
    let spend_score = parsed_spent.map(|spent| (spent / criteria.min_total_spent).min(1.0));

    let parsed_rating = fields::parse_client_rating(rating_raw);
    let rating_score = parsed_rating.map(|rating| (rating / 5.0).min(1.0));

    if info.trim().is_empty() && spend_score.is_none() && rating_score.is_none() {
        return (0.5, "No client data available (neutral)".to_string());
    }

    let mut blend = SignalBlend::new();
    blend.push(verified, VERIFIED_SUBWEIGHT);
    if let Some(score) = spend_score {
        blend.push(score, SPEND_SUBWEIGHT);
    }
    if let Some(score) = rating_score {
        blend.push(score, RATING_SUBWEIGHT);
    }

    let Some(final_score) = blend.blend() else {
        return (0.5, "No client data available (neutral)".to_string());
    };

    let mut parts = Vec::new();
    if verified == 1.0 {
        parts.push("Verified".to_string());
    }
    if let Some(spent) = parsed_spent {
        if spent >= 1_000_000.0 {
            parts.push(format!("${:.1}M+ spent", spent / 1_000_000.0));
        } else if spent >= 1_000.0 {
            parts.push(format!("${:.0}K+ spent", spent / 1_000.0));
        } else {
            parts.push(format!("${:.0}+ spent", spent));
        }
    }
    if let Some(rating) = parsed_rating {
        parts.push(format!("{} rating", rating));
    }

    let detail = if parts.is_empty() {
        "No client data".to_string()
    } else {
        parts.join(", ")
    };

    (final_score, detail)
}
