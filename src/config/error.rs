//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when resolving `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}
