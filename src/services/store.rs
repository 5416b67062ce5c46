use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{JobRecord, MatchReason};

/// Errors that can occur when interacting with the job store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

const JOB_COLUMNS: &str = "uid, title, description, url, job_type, fixed_price, \
    hourly_rate_min, hourly_rate_max, experience_level, skills, key_tools, \
    client_country, client_total_spent, client_rating, client_info_raw, \
    category, categories, category_confidence, match_score, match_reasons";

/// PostgreSQL-backed store for scraped jobs, generated proposals and the
/// preference settings document.
pub struct JobStore {
    pool: PgPool,
}

impl JobStore {
    /// Create a new store from a connection string. Runs pending migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings values.
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL job store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch every stored job, newest first.
    pub async fn all_jobs(&self) -> Result<Vec<JobRecord>, StoreError> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY scraped_at DESC NULLS LAST"
        );

        let jobs = sqlx::query_as::<_, JobRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Fetched {} jobs from store", jobs.len());

        Ok(jobs)
    }

    /// Fetch a single job by uid.
    pub async fn job_by_uid(&self, uid: &str) -> Result<JobRecord, StoreError> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE uid = $1");

        sqlx::query_as::<_, JobRecord>(&query)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("job {uid}")))
    }

    pub async fn job_count(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Persist a match result onto its job row. Reasons are stored as a JSON
    /// text column, same shape the API returns.
    pub async fn save_match_result(
        &self,
        uid: &str,
        score: f64,
        reasons: &[MatchReason],
    ) -> Result<(), StoreError> {
        let reasons_json = serde_json::to_string(reasons)?;

        sqlx::query(
            r#"
            UPDATE jobs
            SET match_score = $2, match_reasons = $3
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .bind(score)
        .bind(reasons_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Write classification results for a batch of jobs in one transaction.
    /// Each entry is (category label, confidence, uid).
    pub async fn update_categories_batch(
        &self,
        updates: &[(String, f64, String)],
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut updated = 0u64;

        for (label, confidence, uid) in updates {
            let result = sqlx::query(
                r#"
                UPDATE jobs
                SET category = $1, category_confidence = $2
                WHERE uid = $3
                "#,
            )
            .bind(label)
            .bind(confidence)
            .bind(uid)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!("Updated categories on {} job rows", updated);

        Ok(updated)
    }

    /// Store a generated proposal for a job.
    pub async fn insert_proposal(
        &self,
        job_uid: &str,
        content: &str,
        model: &str,
    ) -> Result<uuid::Uuid, StoreError> {
        let id = uuid::Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO proposals (id, job_uid, content, model, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(id)
        .bind(job_uid)
        .bind(content)
        .bind(model)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Whether a proposal has already been generated for this job.
    pub async fn proposal_exists(&self, job_uid: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM proposals WHERE job_uid = $1) AS present",
        )
        .bind(job_uid)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("present"))
    }

    /// Load a configuration document from the settings table, if present.
    pub async fn load_config_doc(
        &self,
        config_name: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let row = sqlx::query("SELECT document FROM settings WHERE config_name = $1")
            .bind(config_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("document")))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
