use std::future::Future;

use bytes::Bytes;
use reqwest::header::ACCEPT;

use super::decode::{binary_error, json_error};
use super::error::{ErrorKind, TransportError};
use crate::config::ApiConfig;
use crate::model::{CreateLogRequest, ExportRequest};

/// MIME type of open-format (`.xlsx`) spreadsheets.
pub const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The two outbound calls the form makes.
///
/// Implementations are driven from the transport worker thread, so they must
/// be `Send + Sync` and return `Send` futures.
pub trait LogSheetApi: Send + Sync + 'static {
    /// Creates a log entry. The success body is ignored.
    fn create_log(
        &self,
        request: &CreateLogRequest,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Requests the spreadsheet export and returns its raw bytes.
    fn export_sheet(
        &self,
        request: &ExportRequest,
    ) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

/// [`LogSheetApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    create_url: String,
    export_url: String,
}

impl HttpApi {
    /// Builds a client with the configured timeout.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                TransportError::new(
                    ErrorKind::Transport,
                    format!("failed to build HTTP client: {e}"),
                )
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Uses an existing client for the configured endpoints.
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            create_url: config.create_url(),
            export_url: config.export_url(),
        }
    }
}

// Network-level failures carry no server message, so the user sees the fallback.
fn network_error(err: reqwest::Error) -> TransportError {
    tracing::error!(error = %err, "request failed");
    TransportError::fallback(ErrorKind::Transport)
}

impl LogSheetApi for HttpApi {
    async fn create_log(&self, request: &CreateLogRequest) -> Result<(), TransportError> {
        tracing::info!(url = %self.create_url, date = %request.date, "creating log entry");
        let response = self
            .client
            .post(&self.create_url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(%status, "log entry created");
            return Ok(());
        }
        let body = response.bytes().await.map_err(network_error)?;
        let err = json_error(status.as_u16(), &body);
        tracing::warn!(%status, message = %err.message, "create log rejected");
        Err(err)
    }

    async fn export_sheet(&self, request: &ExportRequest) -> Result<Bytes, TransportError> {
        tracing::info!(url = %self.export_url, "requesting spreadsheet export");
        let response = self
            .client
            .post(&self.export_url)
            .header(ACCEPT, SPREADSHEET_MIME)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        // The body is read as bytes either way; errors are decoded afterwards.
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;
        if status.is_success() {
            tracing::info!(%status, size = body.len(), "spreadsheet received");
            return Ok(body);
        }
        let err = binary_error(status.as_u16(), &body);
        tracing::warn!(%status, message = %err.message, "export rejected");
        Err(err)
    }
}
