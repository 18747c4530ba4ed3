use std::path::{Path, PathBuf};

use super::error::StorageError;

/// Default file name for exported spreadsheets.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "form-data.xlsx";

/// Returns the directory exported spreadsheets are written to.
///
/// The platform download directory when there is one, otherwise the home
/// directory. Returns `StorageError::NoDownloadDir` when neither exists.
pub fn default_export_dir() -> Result<PathBuf, StorageError> {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or(StorageError::NoDownloadDir)
}

/// Writes spreadsheet bytes to `path`, creating parent directories.
///
/// An existing file is overwritten.
pub async fn save_spreadsheet(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
