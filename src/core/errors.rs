use thiserror::Error;

#[derive(Error, Debug)]
pub enum BgwError {
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Unsupported chain: {0} (supported: eth, sol, bnb, base, arbitrum, trx, ton, sui, optimism)")]
    UnsupportedChain(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("{0}")]
    NotFound(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl BgwError {
    /// Input errors are raised before anything goes on the wire.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::UnsupportedChain(_) | Self::InvalidParameters(_))
    }
}
