//! Country and indicator dimension upserts.
//!
//! Both tables are shared with other ingestion sources, so writes are
//! cooperative: keyed upserts only, no deletes. These get called once per
//! qualifying record / once per indicator and must stay cheap and safe
//! under redundant calls.

use sqlx::PgConnection;

use crate::error::Result;

/// Keyed on iso3. `country_name` is always refreshed to the latest seen;
/// `iso2` is only filled when no value was stored before.
pub async fn upsert_country(
    conn: &mut PgConnection,
    iso3: &str,
    country_name: &str,
    iso2: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO dim_country (iso3, iso2, country_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (iso3) DO UPDATE
        SET country_name = EXCLUDED.country_name,
            iso2 = COALESCE(dim_country.iso2, EXCLUDED.iso2),
            updated_at = now()
        "#,
    )
    .bind(iso3)
    .bind(iso2)
    .bind(country_name)
    .execute(conn)
    .await?;

    Ok(())
}

/// Keyed on indicator_code; the name is always overwritten.
pub async fn upsert_indicator(
    conn: &mut PgConnection,
    indicator_code: &str,
    indicator_name: &str,
    indicator_source: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO dim_indicator (indicator_code, indicator_name, indicator_source)
        VALUES ($1, $2, $3)
        ON CONFLICT (indicator_code) DO UPDATE
        SET indicator_name = EXCLUDED.indicator_name,
            updated_at = now()
        "#,
    )
    .bind(indicator_code)
    .bind(indicator_name)
    .bind(indicator_source)
    .execute(conn)
    .await?;

    Ok(())
}
