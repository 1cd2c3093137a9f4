use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorldBankError>;

#[derive(Debug, Error)]
pub enum WorldBankError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WorldBankError {
    fn from(err: reqwest::Error) -> Self {
        WorldBankError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WorldBankError {
    fn from(err: serde_json::Error) -> Self {
        WorldBankError::Parse(err.to_string())
    }
}
