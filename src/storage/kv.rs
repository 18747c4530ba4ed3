use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::error::StorageError;

/// A string key-value store, the terminal stand-in for browser local storage.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Key-value store backed by a single JSON object file.
///
/// The whole file is read on every `get` and rewritten on every `set`. There
/// is no locking: when two processes write, the last writer wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store in the XDG data directory
    /// (`~/.local/share/logsheet/storage.json`).
    ///
    /// The directory is created if it does not already exist.
    pub fn new() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Self::with_path(data_dir.join("logsheet").join("storage.json"))
    }

    /// Creates a store at the given file path, creating parent directories.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable store");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &entries)?;
        Ok(())
    }
}

/// In-process key-value store.
///
/// Clones share the same entries. Used when no data directory is available,
/// and as a fake in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Opens the file store at `path`, or at the default location when `None`.
///
/// Falls back to a [`MemoryStore`] when the file store cannot be set up; the
/// form then works as usual but forgets its cache on exit.
pub fn open_store(path: Option<&Path>) -> Box<dyn KeyValueStore> {
    let store = match path {
        Some(path) => FileStore::with_path(path),
        None => FileStore::new(),
    };
    match store {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "using file store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "file store unavailable, cache kept in memory");
            Box::new(MemoryStore::new())
        }
    }
}
