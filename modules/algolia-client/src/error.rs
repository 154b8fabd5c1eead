use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlgoliaError>;

#[derive(Debug, Error)]
pub enum AlgoliaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AlgoliaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AlgoliaError::Parse(err.to_string())
        } else {
            AlgoliaError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AlgoliaError {
    fn from(err: serde_json::Error) -> Self {
        AlgoliaError::Parse(err.to_string())
    }
}
