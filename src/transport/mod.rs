//! Outbound calls to the log sheet API.
//!
//! Every failure, local or remote, comes back as one [`TransportError`] whose
//! message is ready to show the user. Calls run on a [`Worker`] thread so the
//! terminal stays responsive while a request is pending.

mod client;
mod decode;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod worker;

pub use client::{HttpApi, LogSheetApi, SPREADSHEET_MIME};
pub use decode::{binary_error, json_error};
pub use error::{ErrorKind, FALLBACK_MESSAGE, TransportError};
pub use worker::{Completion, Job, Worker};
