use thiserror::Error;

/// Setup failures. None of these are retryable: the web front-end logs them
/// and leaves the page without a backdrop.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("canvas element #{0} not found")]
    MissingCanvas(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("graphics unavailable: {0}")]
    GraphicsUnavailable(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
