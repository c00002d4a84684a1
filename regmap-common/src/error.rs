use thiserror::Error;

/// Common error type for regmap components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type alias using regmap's Error.
pub type Result<T> = std::result::Result<T, Error>;
