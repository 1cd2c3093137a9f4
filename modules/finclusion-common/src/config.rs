use std::env;

use sqlx::postgres::PgConnectOptions;
use tracing::info;

/// Indicator codes fetched when `WORLD_BANK_INDICATORS` is not set.
pub const DEFAULT_INDICATORS: &[&str] = &[
    // Account ownership (% ages 15+)
    "FX.OWN.TOTL.ZS",
    // Used digital payments (% ages 15+)
    "FX.OWN.TOTL.DT.ZS",
    // Mobile money account (% ages 15+)
    "FX.OWN.TOTL.MM.ZS",
    // Bank branches per 100,000 adults
    "FB.CBK.BRCH.P5",
];

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare environment still runs
/// (against the compose-network `db` host).
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_db: String,
    pub postgres_user: String,
    pub postgres_password: String,

    // World Bank API
    pub worldbank_base_url: String,
    pub worldbank_per_page: u32,
    pub worldbank_timeout_secs: u64,

    /// Indicator codes to ingest, in fetch order.
    pub indicators: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if a numeric var fails to parse.
    pub fn from_env() -> Self {
        let indicators = match env::var("WORLD_BANK_INDICATORS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => DEFAULT_INDICATORS.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            postgres_host: env_or("POSTGRES_HOST", "db"),
            postgres_port: env_or("POSTGRES_PORT", "5432")
                .parse()
                .expect("POSTGRES_PORT must be a number"),
            postgres_db: env_or("POSTGRES_DB", "payments_risk"),
            postgres_user: env_or("POSTGRES_USER", "postgres"),
            postgres_password: env_or("POSTGRES_PASSWORD", "postgres"),
            worldbank_base_url: env_or("WORLD_BANK_BASE", "https://api.worldbank.org/v2"),
            worldbank_per_page: env_or("WORLD_BANK_PER_PAGE", "20000")
                .parse()
                .expect("WORLD_BANK_PER_PAGE must be a number"),
            worldbank_timeout_secs: env_or("WORLD_BANK_TIMEOUT_SECS", "30")
                .parse()
                .expect("WORLD_BANK_TIMEOUT_SECS must be a number"),
            indicators,
        }
    }

    /// Connection options for the warehouse database.
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .database(&self.postgres_db)
            .username(&self.postgres_user)
            .password(&self.postgres_password)
    }

    /// Log the effective configuration without credentials.
    pub fn log_redacted(&self) {
        info!(
            host = %self.postgres_host,
            port = self.postgres_port,
            db = %self.postgres_db,
            base_url = %self.worldbank_base_url,
            indicators = ?self.indicators,
            "Configuration loaded"
        );
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
