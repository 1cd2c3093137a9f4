//! Seam between the orchestrator and the World Bank HTTP client.

use async_trait::async_trait;
use serde_json::Value;
use worldbank_client::WorldBankClient;

/// Anything that can produce the raw record series for one indicator.
/// Production uses [`WorldBankClient`]; tests inject fixtures.
#[async_trait]
pub trait IndicatorFetcher: Send + Sync {
    async fn fetch_indicator(&self, indicator: &str) -> worldbank_client::Result<Vec<Value>>;
}

#[async_trait]
impl IndicatorFetcher for WorldBankClient {
    async fn fetch_indicator(&self, indicator: &str) -> worldbank_client::Result<Vec<Value>> {
        WorldBankClient::fetch_indicator(self, indicator).await
    }
}
