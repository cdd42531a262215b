use crate::config::ConfigError;
use crate::intake::IntakeError;
use crate::backend::BackendError;
use crate::storage::StorageError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The async runtime could not be started.
    #[error("could not start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The intake HTTP client could not be built.
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    /// The backend HTTP client could not be built.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
