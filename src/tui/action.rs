//! Actions returned by screen event handlers.

use crate::model::{CreateLogRequest, ExportRequest};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to navigate between screens and to hand
/// requests to the transport worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Send a validated log entry to the API.
    CreateLog(CreateLogRequest),
    /// Request the spreadsheet export.
    ExportSheet(ExportRequest),
    /// Quit the application.
    Quit,
}
