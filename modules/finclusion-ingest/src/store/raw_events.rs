//! Content-addressed archive of raw records.

use serde_json::Value;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::Result;
use crate::hash;

/// Archive one raw record, keyed on `(source_id, payload_hash)`.
///
/// A payload already seen for this source is a silent no-op, regardless of
/// which run or record_key first observed it. A changed payload gets a new
/// row; nothing here ever overwrites — the archive is append-only history.
pub async fn archive(
    conn: &mut PgConnection,
    run_id: Uuid,
    source_id: i32,
    entity_key: &str,
    record_key: &str,
    payload: &Value,
) -> Result<()> {
    let payload_hash = hash::fingerprint(payload);

    sqlx::query(
        r#"
        INSERT INTO raw_events (run_id, source_id, entity_key, record_key, payload, payload_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (source_id, payload_hash) DO NOTHING
        "#,
    )
    .bind(run_id)
    .bind(source_id)
    .bind(entity_key)
    .bind(record_key)
    .bind(payload)
    .bind(payload_hash)
    .execute(conn)
    .await?;

    Ok(())
}
