use std::io;

/// Failures reading or writing local files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file access failed: {0}")]
    Io(#[from] io::Error),

    /// The store file exists but does not hold a JSON object of strings.
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform reports no per-user data directory.
    #[error("no data directory available")]
    NoDataDir,

    /// Neither a download directory nor a home directory is available.
    #[error("no download directory available")]
    NoDownloadDir,
}
