//! Thin client for the World Bank Open Data v2 API.
//!
//! One request per indicator, no paging loop: `per_page` is set high enough
//! to pull a full series in a single response. No retry layer — transport
//! failures are the caller's problem.

pub mod error;

pub use error::{Result, WorldBankError};

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";

pub struct WorldBankClient {
    client: reqwest::Client,
    base_url: String,
    per_page: u32,
}

impl WorldBankClient {
    pub fn new(base_url: impl Into<String>, per_page: u32, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            per_page,
        })
    }

    /// Fetch the full series for one indicator across all countries.
    ///
    /// The API answers with a two-element array `[metadata, records]`.
    /// A malformed or short payload means "no data", not an error — an
    /// indicator can legitimately have zero data points. Records missing a
    /// country object or a date are dropped here since they can never be
    /// normalized downstream.
    pub async fn fetch_indicator(&self, indicator: &str) -> Result<Vec<Value>> {
        let url = format!("{}/country/all/indicator/{}", self.base_url, indicator);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("per_page", self.per_page.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WorldBankError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: Value = resp.json().await?;
        let records = records_from_payload(payload);
        debug!(indicator, records = records.len(), "Fetched indicator series");
        Ok(records)
    }
}

/// Extract the record list from a `[metadata, records]` payload, keeping only
/// records that carry the fields required for normalization.
pub fn records_from_payload(payload: Value) -> Vec<Value> {
    let Value::Array(mut parts) = payload else {
        return Vec::new();
    };
    if parts.len() < 2 {
        return Vec::new();
    }
    let Value::Array(records) = parts.remove(1) else {
        return Vec::new();
    };

    records
        .into_iter()
        .filter(|r| has_field(r, "country") && has_field(r, "date"))
        .collect()
}

/// Present, non-null, and (for strings) non-empty.
fn has_field(record: &Value, key: &str) -> bool {
    match record.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
