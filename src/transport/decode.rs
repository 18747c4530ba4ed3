//! Turning non-2xx response bodies into [`TransportError`]s.

use serde::Deserialize;

use super::error::{ErrorKind, TransportError};

/// The structured error body the API sends on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn message_or_fallback(body: ErrorBody) -> TransportError {
    match body.message.filter(|m| !m.trim().is_empty()) {
        Some(message) => TransportError::new(ErrorKind::Transport, message),
        None => TransportError::fallback(ErrorKind::Transport),
    }
}

/// Decodes a JSON-framed error body.
///
/// Uses the body's `message` verbatim, or the fallback message when the body
/// is absent, unparseable, or has no message.
pub fn json_error(status: u16, body: &[u8]) -> TransportError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => message_or_fallback(parsed),
        Err(e) => {
            tracing::warn!(status, error = %e, "error response without a JSON body");
            TransportError::fallback(ErrorKind::Transport)
        }
    }
}

/// Decodes an error body that arrived on a binary channel.
///
/// The bytes are read as UTF-8 text and then parsed as the JSON error body.
/// Either step failing yields a [`ErrorKind::Decode`] error with the fallback
/// message.
pub fn binary_error(status: u16, body: &[u8]) -> TransportError {
    let text = match std::str::from_utf8(body) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(status, error = %e, "binary error body is not UTF-8");
            return TransportError::fallback(ErrorKind::Decode);
        }
    };
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(parsed) => message_or_fallback(parsed),
        Err(e) => {
            tracing::warn!(status, error = %e, "binary error body is not a JSON error");
            TransportError::fallback(ErrorKind::Decode)
        }
    }
}
