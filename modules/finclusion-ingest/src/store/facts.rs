//! Fact table upsert: the current value of each (country, indicator, year).

use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::Result;
use crate::normalize::NormalizedRecord;

/// Keyed on `(source_id, iso3, indicator_code, year)`. On conflict both the
/// value and the run_id are replaced, so the table always reflects the most
/// recently ingested observation — including an explicit null, which is a
/// valid overwrite of a prior number ("observed but unreported").
pub async fn upsert(
    conn: &mut PgConnection,
    run_id: Uuid,
    source_id: i32,
    record: &NormalizedRecord,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO fact_country_indicator (run_id, source_id, iso3, indicator_code, year, value)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (source_id, iso3, indicator_code, year) DO UPDATE
        SET value = EXCLUDED.value,
            run_id = EXCLUDED.run_id,
            updated_at = now()
        "#,
    )
    .bind(run_id)
    .bind(source_id)
    .bind(&record.iso3)
    .bind(&record.indicator_code)
    .bind(record.year)
    .bind(record.value)
    .execute(conn)
    .await?;

    Ok(())
}
