//! Source registry lookup. The sources table is owned elsewhere; this
//! pipeline only reads it, and fails closed on an unregistered key.

use sqlx::PgConnection;

use crate::error::{IngestError, Result};

pub async fn resolve(conn: &mut PgConnection, source_key: &str) -> Result<i32> {
    let source_id = sqlx::query_scalar::<_, i32>(
        "SELECT source_id FROM sources WHERE source_key = $1",
    )
    .bind(source_key)
    .fetch_optional(conn)
    .await?;

    source_id.ok_or_else(|| IngestError::UnknownSource(source_key.to_string()))
}
