//! Ingestion run lifecycle.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
        }
    }
}

/// A row from the ingestion_runs table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RunRow {
    pub run_id: Uuid,
    pub source_key: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub records_fetched: i64,
    pub error_message: Option<String>,
}

/// Insert a new run with status `started` and return its id.
pub async fn start(
    pool: &PgPool,
    source_key: &str,
    source_name: &str,
    source_url: &str,
) -> Result<Uuid> {
    let run_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO ingestion_runs (run_id, source_key, source_name, source_url, status)
        VALUES ($1, $2, $3, $4, 'started')
        "#,
    )
    .bind(run_id)
    .bind(source_key)
    .bind(source_name)
    .bind(source_url)
    .execute(pool)
    .await?;

    Ok(run_id)
}

/// Terminal transition. Called exactly once per run; a run that never
/// reaches this stayed `started`, which is the crash signal operators
/// alert on.
pub async fn finish(
    pool: &PgPool,
    run_id: Uuid,
    status: RunStatus,
    records_fetched: i64,
    error: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE ingestion_runs
        SET status = $2, finished_at = now(), records_fetched = $3, error_message = $4
        WHERE run_id = $1
        "#,
    )
    .bind(run_id)
    .bind(status.as_str())
    .bind(records_fetched)
    .bind(error)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch one run row (used by tests and operational tooling).
pub async fn get(pool: &PgPool, run_id: Uuid) -> Result<Option<RunRow>> {
    let row = sqlx::query_as::<_, RunRow>(
        r#"
        SELECT run_id, source_key, status, started_at, finished_at, records_fetched, error_message
        FROM ingestion_runs
        WHERE run_id = $1
        "#,
    )
    .bind(run_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
