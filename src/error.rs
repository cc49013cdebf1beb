//! Error types for persistence, configuration and the index worker.

use thiserror::Error;

/// Errors from the scene database.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform data directory to place the database in
    #[error("No data directory available")]
    NoDataDir,
}

/// Result type alias for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors from loading, saving or watching the editor config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from the index worker transport.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker thread has exited and its channel is closed
    #[error("Index worker disconnected")]
    Disconnected,

    #[error("Failed to spawn index worker: {0}")]
    Spawn(#[from] std::io::Error),
}
