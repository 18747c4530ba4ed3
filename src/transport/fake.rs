//! Scriptable [`LogSheetApi`] for tests.

use std::sync::{Arc, Mutex};

use bytes::Bytes;

use super::client::LogSheetApi;
use super::error::TransportError;
use super::worker::Job;
use crate::model::{CreateLogRequest, ExportRequest};

/// Replays canned results and records the requests it saw.
pub struct FakeApi {
    pub create: Result<(), TransportError>,
    pub export: Result<Bytes, TransportError>,
    pub seen: Arc<Mutex<Vec<Job>>>,
}

impl FakeApi {
    pub fn ok() -> Self {
        Self {
            create: Ok(()),
            export: Ok(Bytes::from_static(b"PK\x03\x04")),
            seen: Arc::default(),
        }
    }
}

impl LogSheetApi for FakeApi {
    async fn create_log(&self, request: &CreateLogRequest) -> Result<(), TransportError> {
        self.seen
            .lock()
            .unwrap()
            .push(Job::CreateLog(request.clone()));
        self.create.clone()
    }

    async fn export_sheet(&self, request: &ExportRequest) -> Result<Bytes, TransportError> {
        self.seen
            .lock()
            .unwrap()
            .push(Job::ExportSheet(request.clone()));
        self.export.clone()
    }
}
