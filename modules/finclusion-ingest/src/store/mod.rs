//! Postgres persistence for the ingestion pipeline.
//!
//! Upsert-style functions take `&mut PgConnection` so they compose into the
//! orchestrator's per-indicator transactions; run lifecycle functions take
//! the pool because they must be durable independently of any batch.

pub mod dims;
pub mod facts;
pub mod raw_events;
pub mod runs;
pub mod sources;

use sqlx::PgPool;

use crate::error::Result;

/// Apply the embedded SQL migrations. The DDL is idempotent, so this runs
/// on every invocation.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| crate::error::IngestError::Database(e.into()))?;
    Ok(())
}
