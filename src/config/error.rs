//! Configuration errors.

/// Error loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Semantic validation failure after a successful load.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("server host does not form a valid socket address")]
    InvalidHost,

    #[error("request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("ai api key is required when the gemini provider is selected")]
    MissingApiKey,

    #[error("rate limit window must be non-zero")]
    InvalidRateLimitWindow,
}
