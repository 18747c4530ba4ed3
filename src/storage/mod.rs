//! Local persistence: the key-value store behind the field cache, and writing
//! exported spreadsheets to disk.
//!
//! The cache is a convenience. Every read or write failure degrades to "no
//! cache" with a log line, never to a user-facing error.

mod cache;
mod download;
mod error;
mod kv;

pub use cache::{CACHE_KEY, load_cache, save_cache};
pub use download::{DEFAULT_EXPORT_FILE_NAME, default_export_dir, save_spreadsheet};
pub use error::StorageError;
pub use kv::{FileStore, KeyValueStore, MemoryStore, open_store};
