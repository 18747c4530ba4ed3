use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use super::client::LogSheetApi;
use super::error::TransportError;
use crate::model::{CreateLogRequest, ExportRequest};
use crate::storage::save_spreadsheet;

/// A call for the worker to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    CreateLog(CreateLogRequest),
    ExportSheet(ExportRequest),
}

/// The settled outcome of a [`Job`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    LogCreated(Result<(), TransportError>),
    /// On success, the path the spreadsheet was written to.
    SheetExported(Result<PathBuf, TransportError>),
}

/// Runs API calls on a background thread with its own tokio runtime.
///
/// Jobs are processed one at a time in submission order. Completions are
/// collected by the UI loop with [`try_recv`](Self::try_recv). Dropping the
/// worker closes the job queue; the thread exits once any in-flight call
/// settles.
pub struct Worker {
    jobs: UnboundedSender<Job>,
    completions: mpsc::Receiver<Completion>,
}

impl Worker {
    /// Spawns the worker thread.
    ///
    /// Exported spreadsheets are written to `export_path`.
    pub fn spawn<A: LogSheetApi>(api: A, export_path: PathBuf) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (job_tx, mut job_rx) = unbounded_channel::<Job>();
        let (done_tx, done_rx) = mpsc::channel::<Completion>();

        thread::Builder::new()
            .name("logsheet-transport".into())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(job) = job_rx.recv().await {
                        let completion = run_job(&api, &export_path, job).await;
                        if done_tx.send(completion).is_err() {
                            break;
                        }
                    }
                });
                tracing::debug!("transport worker stopped");
            })?;

        Ok(Self {
            jobs: job_tx,
            completions: done_rx,
        })
    }

    /// Queues a job. Returns `false` if the worker thread has gone away.
    pub fn submit(&self, job: Job) -> bool {
        self.jobs.send(job).is_ok()
    }

    /// Returns the next settled job, if one is ready.
    pub fn try_recv(&self) -> Option<Completion> {
        self.completions.try_recv().ok()
    }

    /// Waits up to `timeout` for the next settled job.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        self.completions.recv_timeout(timeout).ok()
    }
}

async fn run_job<A: LogSheetApi>(api: &A, export_path: &Path, job: Job) -> Completion {
    match job {
        Job::CreateLog(request) => Completion::LogCreated(api.create_log(&request).await),
        Job::ExportSheet(request) => {
            let result = match api.export_sheet(&request).await {
                Ok(bytes) => save_spreadsheet(export_path, &bytes)
                    .await
                    .map(|()| export_path.to_path_buf())
                    .map_err(TransportError::from),
                Err(e) => Err(e),
            };
            if let Ok(path) = &result {
                tracing::info!(path = %path.display(), "spreadsheet saved");
            }
            Completion::SheetExported(result)
        }
    }
}
