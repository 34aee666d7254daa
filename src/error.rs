use std::io;
use thiserror::Error;

/// Error type for pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The submitted closure panicked while a worker was executing it.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was dropped before any worker executed it, either because
    /// the pending backlog was discarded or because the pool shut down
    /// while the task was still queued.
    #[error("task was discarded before execution")]
    Discarded,

    /// A worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
