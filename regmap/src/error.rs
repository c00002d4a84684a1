//! Error types for site configuration.

use regmap_catalog::CatalogError;
use thiserror::Error;

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading a site configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or parsed.
    #[error(transparent)]
    Load(#[from] regmap_common::Error),

    /// Configuration validation error.
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// A device entry does not match the catalog.
    #[error("File '{file}', master {host}, slave {index}: {source}")]
    Device {
        file: String,
        host: String,
        index: u32,
        #[source]
        source: CatalogError,
    },
}

impl ConfigError {
    /// Create a configuration validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
