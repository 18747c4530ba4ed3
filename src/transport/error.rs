use crate::model::ValidationError;
use crate::storage::StorageError;

/// Message shown when the server gives no usable explanation.
pub const FALLBACK_MESSAGE: &str = "something went wrong";

/// Where a failed call went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected locally and never sent.
    Validation,
    /// Network failure or a non-2xx response.
    Transport,
    /// A binary-framed error body could not be read as a JSON error.
    Decode,
    /// The exported spreadsheet could not be written to disk.
    Storage,
}

/// The single error type produced by the transport layer.
///
/// `message` is always fit to show the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: ErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An error of the given kind carrying [`FALLBACK_MESSAGE`].
    pub fn fallback(kind: ErrorKind) -> Self {
        Self::new(kind, FALLBACK_MESSAGE)
    }
}

impl From<ValidationError> for TransportError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorKind::Validation, err.to_string())
    }
}

impl From<StorageError> for TransportError {
    fn from(err: StorageError) -> Self {
        Self::new(
            ErrorKind::Storage,
            format!("could not save spreadsheet: {err}"),
        )
    }
}
