use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{classify_job, composer, Matcher, Portfolio};
use crate::models::{
    ClassifyResponse, ComposeProposalRequest, ComposeProposalResponse, ErrorResponse,
    HealthResponse, MatchJobsRequest, MatchJobsResponse, ScoreJobResponse,
};
use crate::services::{JobStore, LlmClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
    pub llm: Arc<LlmClient>,
    pub matcher: Matcher,
    pub portfolio: Portfolio,
}

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/jobs/match", web::post().to(match_jobs))
        .route("/jobs/classify", web::post().to(classify_jobs))
        .route("/jobs/{uid}/score", web::get().to(score_job))
        .route("/proposals/compose", web::post().to(compose_proposal));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Batch matching endpoint
///
/// POST /api/v1/jobs/match
///
/// Scores every stored job against the preference profile, persists scores
/// back to the jobs table (unless disabled) and returns the matches above
/// the effective threshold, best first.
async fn match_jobs(
    state: web::Data<AppState>,
    req: Option<web::Json<MatchJobsRequest>>,
) -> impl Responder {
    let req = req.map(|json| json.into_inner()).unwrap_or_default();
    // Cap limit at 200 to keep responses bounded
    let limit = req.limit.min(200) as usize;

    let jobs = match state.store.all_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!("Failed to fetch jobs for matching: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch jobs".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::info!("Matching {} stored jobs, limit {}", jobs.len(), limit);

    let outcome = state.matcher.matching_jobs(jobs);

    if req.persist_scores {
        for scored in &outcome.matches {
            if let Err(e) = state
                .store
                .save_match_result(&scored.uid, scored.match_score, &scored.match_reasons)
                .await
            {
                tracing::warn!("Failed to persist match result for {}: {}", scored.uid, e);
            }
        }
    }

    let response = MatchJobsResponse {
        matches: outcome.matches.into_iter().take(limit).collect(),
        total_candidates: outcome.total_candidates,
        effective_threshold: outcome.effective_threshold,
    };

    tracing::info!(
        "Returning {} matches at threshold {} (from {} candidates)",
        response.matches.len(),
        response.effective_threshold,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Batch classification endpoint
///
/// POST /api/v1/jobs/classify
///
/// Runs the keyword classifier over every stored job, writes the assigned
/// category and confidence back, and returns the category distribution.
async fn classify_jobs(state: web::Data<AppState>) -> impl Responder {
    let jobs = match state.store.all_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!("Failed to fetch jobs for classification: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch jobs".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let mut updates = Vec::with_capacity(jobs.len());
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut low_confidence = 0usize;

    for job in &jobs {
        let (category, confidence) = classify_job(&job.title, &job.description, &job.skill_list());
        let label = category.label().to_string();
        *distribution.entry(label.clone()).or_insert(0) += 1;
        if confidence < 0.5 {
            low_confidence += 1;
        }
        updates.push((label, confidence, job.uid.clone()));
    }

    if let Err(e) = state.store.update_categories_batch(&updates).await {
        tracing::error!("Failed to persist classifications: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to persist classifications".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    tracing::info!(
        "Classified {} jobs ({} low confidence)",
        jobs.len(),
        low_confidence
    );

    HttpResponse::Ok().json(ClassifyResponse {
        total: jobs.len(),
        low_confidence,
        distribution,
    })
}

/// Single-job scoring endpoint
///
/// GET /api/v1/jobs/{uid}/score
///
/// Always computes a fresh score; the stored match_score is never reused.
async fn score_job(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let uid = path.into_inner();

    let job = match state.store.job_by_uid(&uid).await {
        Ok(job) => job,
        Err(StoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Job not found".to_string(),
                message: format!("No job with uid {uid}"),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch job {}: {}", uid, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch job".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let (score, reasons) = state.matcher.score(&job);

    HttpResponse::Ok().json(ScoreJobResponse {
        uid: job.uid,
        title: job.title,
        match_score: score,
        match_reasons: reasons,
    })
}

/// Proposal generation endpoint
///
/// POST /api/v1/proposals/compose
///
/// Request body:
/// ```json
/// {
///   "uid": "string",
///   "force": false
/// }
/// ```
async fn compose_proposal(
    state: web::Data<AppState>,
    req: web::Json<ComposeProposalRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let job = match state.store.job_by_uid(&req.uid).await {
        Ok(job) => job,
        Err(StoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Job not found".to_string(),
                message: format!("No job with uid {}", req.uid),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch job {}: {}", req.uid, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch job".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if !req.force {
        match state.store.proposal_exists(&req.uid).await {
            Ok(true) => {
                return HttpResponse::Conflict().json(ErrorResponse {
                    error: "Proposal already exists".to_string(),
                    message: format!(
                        "A proposal for job {} was already generated; pass force=true to regenerate",
                        req.uid
                    ),
                    status_code: 409,
                });
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to check existing proposals for {}, generating anyway: {}",
                    req.uid,
                    e
                );
            }
        }
    }

    let (score, reasons) = state.matcher.score(&job);
    let (system, user) = composer::proposal_prompt(&job, score, &reasons, &state.portfolio, 3);

    let proposal = match state.llm.complete(&system, &user).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Proposal generation failed for {}: {}", req.uid, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Proposal generation failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    if let Err(e) = state
        .store
        .insert_proposal(&req.uid, &proposal, state.llm.model())
        .await
    {
        tracing::error!("Failed to store proposal for {}: {}", req.uid, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to store proposal".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    HttpResponse::Ok().json(ComposeProposalResponse {
        uid: req.uid.clone(),
        proposal,
        model: state.llm.model().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
