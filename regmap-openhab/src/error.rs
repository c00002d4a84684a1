use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing generated files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result type alias using [`OutputError`].
pub type Result<T> = std::result::Result<T, OutputError>;
