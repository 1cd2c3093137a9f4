use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finclusion_common::Config;
use finclusion_ingest::{store, Pipeline};
use worldbank_client::WorldBankClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("finclusion_ingest=info".parse()?)
                .add_directive("worldbank_client=info".parse()?),
        )
        .init();

    info!("World Bank ingestion starting...");

    let config = Config::from_env();
    config.log_redacted();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(config.pg_connect_options())
        .await?;

    store::migrate(&pool).await?;

    let fetcher = WorldBankClient::new(
        config.worldbank_base_url.clone(),
        config.worldbank_per_page,
        Duration::from_secs(config.worldbank_timeout_secs),
    )?;

    let pipeline = Pipeline::new(
        pool,
        Arc::new(fetcher),
        config.indicators.clone(),
        config.worldbank_base_url.clone(),
    );

    // On failure the run row is already marked failed; the error propagates
    // for a non-zero exit so the scheduler can decide about retries.
    let summary = pipeline.run().await?;
    info!(
        records = summary.records,
        run_id = %summary.run_id,
        "World Bank ingestion succeeded"
    );

    Ok(())
}
