/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The source key has no row in the sources table. Fatal before any
    /// fetch — data that cannot be attributed is not worth fetching.
    #[error("source_key not registered in sources table: {0}")]
    UnknownSource(String),

    /// Transport failure from the World Bank API. Fatal to the run.
    #[error("World Bank fetch failed: {0}")]
    Fetch(#[from] worldbank_client::WorldBankError),

    /// A record the API contract says cannot exist (e.g. non-numeric date).
    /// Fatal: signals an upstream contract break, not a data gap.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
