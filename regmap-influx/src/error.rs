use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while generating Flux tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Failed to read templates from {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("No .flux templates found in {}", .0.display())]
    NoTemplates(PathBuf),

    #[error("Invalid template {name}: {source}")]
    Template { name: String, source: tera::Error },

    #[error("Failed to render {name}: {source}")]
    Render { name: String, source: tera::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result type alias using [`TaskError`].
pub type Result<T> = std::result::Result<T, TaskError>;
