//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The query session failed.
    #[error(transparent)]
    Runtime(#[from] runtime::Error),

    /// Event could not be rendered as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
