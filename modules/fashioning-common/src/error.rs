use thiserror::Error;

#[derive(Error, Debug)]
pub enum FashioningError {
    #[error("Adapter fetch error ({source_name}): {message}")]
    AdapterFetch {
        source_name: String,
        message: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("All {0} sources failed")]
    AllSourcesFailed(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
