use std::cmp::Ordering;

use crate::core::scoring::score_job;
use crate::models::{JobRecord, MatchReason, PreferenceProfile, ScoredJob};

/// Threshold used when the profile carries no threshold key at all. Profile
/// validation normally guarantees one is present.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// Result of a batch matching pass.
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredJob>,
    pub total_candidates: usize,
    /// The threshold that actually produced the matches (may be a relaxed
    /// one when the configured threshold yielded nothing).
    pub effective_threshold: f64,
}

/// Preference-driven job matcher.
///
/// Holds an immutable preference profile for the run and applies the scoring
/// pipeline to single jobs or whole batches. Stateless beyond the profile;
/// safe to share across workers.
#[derive(Debug, Clone)]
pub struct Matcher {
    preferences: PreferenceProfile,
}

impl Matcher {
    pub fn new(preferences: PreferenceProfile) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &PreferenceProfile {
        &self.preferences
    }

    /// Score a single job. Fresh computation on every call, nothing cached.
    pub fn score(&self, job: &JobRecord) -> (f64, Vec<MatchReason>) {
        score_job(job, &self.preferences)
    }

    /// Score a batch and keep the jobs that clear the match threshold.
    ///
    /// Jobs scoring exactly 0 (exclusions, total mismatches) are dropped
    /// before any threshold filtering and never reappear, even under relaxed
    /// thresholds. When nothing clears the configured threshold, a score
    /// distribution is logged and the configured relaxation ladder is tried
    /// in order, adopting the first threshold with at least one match.
    /// Results are sorted by score descending; ties keep their input order.
    pub fn matching_jobs(&self, jobs: Vec<JobRecord>) -> MatchOutcome {
        let total_candidates = jobs.len();
        let threshold = self.preferences.effective_threshold(DEFAULT_THRESHOLD);

        let scored: Vec<ScoredJob> = jobs
            .iter()
            .filter_map(|job| {
                let (score, reasons) = score_job(job, &self.preferences);
                if score > 0.0 {
                    Some(ScoredJob::from_job(job, score, reasons))
                } else {
                    None
                }
            })
            .collect();

        let mut effective_threshold = threshold;
        let mut matching: Vec<ScoredJob> = scored
            .iter()
            .filter(|job| job.match_score >= threshold)
            .cloned()
            .collect();

        if matching.is_empty() && !scored.is_empty() {
            let max_score = scored
                .iter()
                .map(|job| job.match_score)
                .fold(f64::NEG_INFINITY, f64::max);
            let above_50 = scored.iter().filter(|j| j.match_score >= 50.0).count();
            let above_30 = scored.iter().filter(|j| j.match_score >= 30.0).count();

            tracing::info!(
                "No jobs matched at threshold {}. Score distribution: max {:.1}, {} scoring 50+, {} scoring 30+",
                threshold,
                max_score,
                above_50,
                above_30
            );
            tracing::info!(
                "Tip: lower match_threshold in the preference profile (currently {})",
                threshold
            );

            for &relaxed in &self.preferences.auto_relax_thresholds {
                if relaxed >= threshold {
                    continue;
                }
                let relaxed_matches: Vec<ScoredJob> = scored
                    .iter()
                    .filter(|job| job.match_score >= relaxed)
                    .cloned()
                    .collect();
                if !relaxed_matches.is_empty() {
                    tracing::info!(
                        "Auto-relaxing threshold to {}: found {} matches",
                        relaxed,
                        relaxed_matches.len()
                    );
                    matching = relaxed_matches;
                    effective_threshold = relaxed;
                    break;
                }
            }
        }

        // Stable sort: equal scores keep their original order.
        matching.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });

        MatchOutcome {
            matches: matching,
            total_candidates,
            effective_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPrefs, ClientCriteria, CriterionWeights};

    fn job(uid: &str, title: &str, categories: &str, skills: &str, price: f64) -> JobRecord {
        JobRecord {
            uid: uid.to_string(),
            title: title.to_string(),
            description: String::new(),
            url: None,
            job_type: Some("Fixed".to_string()),
            fixed_price: Some(price),
            hourly_rate_min: None,
            hourly_rate_max: None,
            experience_level: None,
            skills: Some(skills.to_string()),
            key_tools: None,
            client_country: None,
            // No client data: client_quality stays at the neutral 0.5, which
            // keeps these fixture scores exact (92.5 / 70 / 27.5).
            client_total_spent: None,
            client_rating: None,
            client_info_raw: None,
            category: None,
            categories: Some(categories.to_string()),
            category_confidence: None,
            match_score: None,
            match_reasons: None,
        }
    }

    fn preferences(threshold: f64, relax: Vec<f64>) -> PreferenceProfile {
        PreferenceProfile {
            categories: vec!["RAG / Document AI".to_string()],
            required_skills: vec!["Python".to_string(), "LangChain".to_string()],
            nice_to_have_skills: vec!["Pinecone".to_string()],
            budget: BudgetPrefs {
                fixed_min: 1000.0,
                fixed_max: 10000.0,
                hourly_min: 40.0,
                flexibility_low: 0.8,
                flexibility_high: 1.5,
            },
            client_criteria: ClientCriteria {
                payment_verified: true,
                min_total_spent: 10000.0,
                min_rating: 4.5,
            },
            exclusion_keywords: vec!["data entry".to_string()],
            exclusions: None,
            weights: CriterionWeights::default(),
            threshold: None,
            match_threshold: Some(threshold),
            auto_relax_thresholds: relax,
        }
    }

    fn strong_job(uid: &str) -> JobRecord {
        job(
            uid,
            "Build RAG system",
            r#"["RAG / Document AI"]"#,
            r#"["Python", "LangChain", "Pinecone"]"#,
            2500.0,
        )
    }

    fn medium_job(uid: &str) -> JobRecord {
        job(
            uid,
            "Some AI work",
            r#"["RAG / Document AI"]"#,
            r#"["Python"]"#,
            2500.0,
        )
    }

    fn weak_job(uid: &str) -> JobRecord {
        job(uid, "Unrelated gig", "[]", "[]", 2500.0)
    }

    #[test]
    fn test_matches_above_threshold() {
        let matcher = Matcher::new(preferences(70.0, vec![50.0, 30.0]));
        let outcome = matcher.matching_jobs(vec![strong_job("~a"), weak_job("~b")]);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].uid, "~a");
        assert_eq!(outcome.effective_threshold, 70.0);
        assert_eq!(outcome.total_candidates, 2);
    }

    #[test]
    fn test_zero_scores_dropped_entirely() {
        let matcher = Matcher::new(preferences(99.0, vec![0.0]));
        let mut excluded = strong_job("~x");
        excluded.title = "data entry work".to_string();
        // Only candidate scores 0: nothing to match even at a relaxed floor.
        let outcome = matcher.matching_jobs(vec![excluded]);
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_graceful_degradation() {
        // Scores 92.5 / 70 / 27.5 with threshold 95 and ladder [93, 50]:
        // 93 still yields nothing, 50 picks up the top two.
        let matcher = Matcher::new(preferences(95.0, vec![93.0, 50.0]));
        let outcome =
            matcher.matching_jobs(vec![medium_job("~m"), strong_job("~s"), weak_job("~w")]);
        assert_eq!(outcome.effective_threshold, 50.0);
        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].uid, "~s");
        assert_eq!(outcome.matches[1].uid, "~m");
    }

    #[test]
    fn test_degradation_exhausted_returns_empty() {
        let matcher = Matcher::new(preferences(99.0, vec![98.0]));
        let outcome = matcher.matching_jobs(vec![weak_job("~w")]);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.effective_threshold, 99.0);
    }

    #[test]
    fn test_relaxed_threshold_must_be_lower() {
        // A "relaxed" threshold above the configured one is skipped.
        let matcher = Matcher::new(preferences(95.0, vec![97.0]));
        let outcome = matcher.matching_jobs(vec![strong_job("~s")]);
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_sorted_descending_stable() {
        let matcher = Matcher::new(preferences(10.0, vec![]));
        let outcome = matcher.matching_jobs(vec![
            medium_job("~first"),
            strong_job("~top"),
            medium_job("~second"),
        ]);
        assert_eq!(outcome.matches[0].uid, "~top");
        // Equal scores keep input order.
        assert_eq!(outcome.matches[1].uid, "~first");
        assert_eq!(outcome.matches[2].uid, "~second");
    }

    #[test]
    fn test_single_job_scoring_contract() {
        let matcher = Matcher::new(preferences(70.0, vec![]));
        let (score, reasons) = matcher.score(&strong_job("~s"));
        assert!(score > 70.0);
        assert_eq!(reasons.len(), 5);
    }
}
