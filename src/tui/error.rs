use crate::storage::StorageError;
use crate::transport::TransportError;

/// Errors that stop the app from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, worker thread).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The export location could not be resolved.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The HTTP client could not be built.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
