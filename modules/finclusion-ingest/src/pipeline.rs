//! Orchestrator: drives the indicator loop under one run's lifecycle.
//!
//! Durability model is batch-per-indicator: each indicator's records are
//! written inside one transaction, committed when its loop completes. A
//! failure mid-indicator drops only that transaction; earlier indicators
//! stay committed, and the run row records the committed-so-far total.

use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::Result;
use crate::fetch::IndicatorFetcher;
use crate::normalize;
use crate::store::{dims, facts, raw_events, runs, runs::RunStatus, sources};

pub const SOURCE_KEY: &str = "world_bank";
pub const SOURCE_NAME: &str = "World Bank Open Data API";

pub struct Pipeline {
    pool: PgPool,
    fetcher: Arc<dyn IndicatorFetcher>,
    indicators: Vec<String>,
    /// Recorded on the run row as provenance; also the `{base}` of every fetch.
    source_url: String,
}

/// What a completed run reports back to the caller.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub records: i64,
}

impl Pipeline {
    pub fn new(
        pool: PgPool,
        fetcher: Arc<dyn IndicatorFetcher>,
        indicators: Vec<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            fetcher,
            indicators,
            source_url: source_url.into(),
        }
    }

    /// Execute one full ingestion run.
    ///
    /// Always leaves a terminal run row behind: `succeeded` with the final
    /// total, or `failed` with the committed-so-far total and the error
    /// text. The error is returned to the caller either way — retry policy
    /// belongs to the scheduler, not here.
    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = runs::start(&self.pool, SOURCE_KEY, SOURCE_NAME, &self.source_url).await?;
        info!(%run_id, indicators = self.indicators.len(), "Ingestion run started");

        let mut committed: i64 = 0;
        match self.ingest_all(run_id, &mut committed).await {
            Ok(()) => {
                runs::finish(&self.pool, run_id, RunStatus::Succeeded, committed, None).await?;
                info!(%run_id, records = committed, "Ingestion run succeeded");
                Ok(RunSummary {
                    run_id,
                    records: committed,
                })
            }
            Err(e) => {
                // The failing indicator's transaction was dropped unclosed,
                // which rolls it back; earlier batches remain durable.
                let msg = e.to_string();
                if let Err(finish_err) =
                    runs::finish(&self.pool, run_id, RunStatus::Failed, committed, Some(&msg))
                        .await
                {
                    error!(%run_id, error = %finish_err, "Failed to record run failure");
                }
                error!(%run_id, records = committed, error = %msg, "Ingestion run failed");
                Err(e)
            }
        }
    }

    async fn ingest_all(&self, run_id: Uuid, committed: &mut i64) -> Result<()> {
        // Fail fast: nothing is fetched for a source we cannot attribute.
        let mut conn = self.pool.acquire().await?;
        let source_id = sources::resolve(&mut conn, SOURCE_KEY).await?;
        drop(conn);

        for indicator in &self.indicators {
            let count = self.ingest_indicator(run_id, source_id, indicator).await?;
            *committed += count;
            info!(indicator, records = count, "Indicator batch committed");
        }
        Ok(())
    }

    /// Fetch one indicator and write its batch inside one transaction.
    /// Returns the number of qualifying records committed.
    async fn ingest_indicator(
        &self,
        run_id: Uuid,
        source_id: i32,
        indicator: &str,
    ) -> Result<i64> {
        let records = self.fetcher.fetch_indicator(indicator).await?;

        let mut tx = self.pool.begin().await?;

        // Refresh the indicator name once per run, from the first record's
        // metadata. Best effort: an unusable name falls back to the code.
        if let Some(first) = records.first() {
            let name = first
                .pointer("/indicator/value")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(indicator);
            dims::upsert_indicator(&mut tx, indicator, name, SOURCE_KEY).await?;
        }

        let mut count: i64 = 0;
        let mut skipped: u64 = 0;
        for raw in &records {
            let rec = normalize::normalize(raw)?;
            if !rec.is_attributable() {
                // No country or indicator attribution: not an error, not a
                // success. Silently dropped.
                skipped += 1;
                continue;
            }

            dims::upsert_country(&mut tx, &rec.iso3, &rec.country_name, None).await?;
            raw_events::archive(
                &mut tx,
                run_id,
                source_id,
                &rec.indicator_code,
                &rec.record_key(),
                raw,
            )
            .await?;
            facts::upsert(&mut tx, run_id, source_id, &rec).await?;
            count += 1;
        }

        tx.commit().await?;

        if skipped > 0 {
            debug!(indicator, skipped, "Dropped unattributable records");
        }
        Ok(count)
    }
}
