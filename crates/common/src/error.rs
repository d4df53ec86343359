//! Error types for Karabatch

use thiserror::Error;

/// Result type alias using Karabatch Error
pub type Result<T> = std::result::Result<T, Error>;

/// Karabatch error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("project root does not exist: {0}")]
    ProjectRootMissing(String),

    #[error("test resources directory not found under: {0}")]
    ResourceBaseMissing(String),

    #[error("a batch is already running")]
    BatchInFlight,

    #[error("Internal error: {0}")]
    Internal(String),
}
