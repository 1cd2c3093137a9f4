//! Test harness: real Postgres via testcontainers, fixture fetchers for the
//! World Bank API.
//!
//! **Requires:** Docker.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use testcontainers::{
    core::{ContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use finclusion_ingest::{store, IndicatorFetcher};
use worldbank_client::WorldBankError;

/// Spin up a Postgres container, connect, and apply migrations.
///
/// The container stops when `ContainerAsync` is dropped, so callers must
/// hold it alive for the duration of the test.
pub async fn pg_container() -> (ContainerAsync<GenericImage>, PgPool) {
    let image = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_USER", "postgres")
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "finclusion_test");

    let container: ContainerAsync<GenericImage> = image
        .start()
        .await
        .expect("Failed to start Postgres container");

    let host_port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get Postgres host port");

    let options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(host_port)
        .database("finclusion_test")
        .username("postgres")
        .password("postgres");

    // Postgres restarts once during image init; retry until TCP is truly up.
    let mut attempts = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(_) if attempts < 40 => {
                attempts += 1;
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
            Err(e) => panic!("Failed to connect to Postgres: {e}"),
        }
    };

    store::migrate(&pool).await.expect("Migration failed");

    (container, pool)
}

/// Build a raw World Bank record in the shape the v2 API serves.
pub fn wb_record(
    iso3: &str,
    country: &str,
    code: &str,
    name: &str,
    year: i32,
    value: Option<f64>,
) -> Value {
    json!({
        "countryiso3code": iso3,
        "country": {"id": "", "value": country},
        "indicator": {"id": code, "value": name},
        "date": year.to_string(),
        "value": value,
        "unit": "",
        "obs_status": "",
        "decimal": 1
    })
}

/// Serves canned series per indicator; unknown indicators have no data.
#[derive(Default)]
pub struct FixtureFetcher {
    series: HashMap<String, Vec<Value>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, indicator: &str, records: Vec<Value>) -> Self {
        self.series.insert(indicator.to_string(), records);
        self
    }
}

#[async_trait]
impl IndicatorFetcher for FixtureFetcher {
    async fn fetch_indicator(&self, indicator: &str) -> worldbank_client::Result<Vec<Value>> {
        Ok(self.series.get(indicator).cloned().unwrap_or_default())
    }
}

/// Like [`FixtureFetcher`], but one indicator fails with a transport error.
pub struct FailingFetcher {
    pub inner: FixtureFetcher,
    pub fail_on: String,
}

#[async_trait]
impl IndicatorFetcher for FailingFetcher {
    async fn fetch_indicator(&self, indicator: &str) -> worldbank_client::Result<Vec<Value>> {
        if indicator == self.fail_on {
            return Err(WorldBankError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        self.inner.fetch_indicator(indicator).await
    }
}

/// Row count of a table. Test-only; table names come from the suite itself.
pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT count(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query failed")
}
