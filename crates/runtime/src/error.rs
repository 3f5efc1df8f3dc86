use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The query-service process could not be started.
    #[error("failed to spawn agent process: {0}")]
    Spawn(String),

    /// The query-service process exited with a nonzero status.
    #[error("agent process exited with {status}: {stderr}")]
    Query { status: ExitStatus, stderr: String },

    /// Reading the process's output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
