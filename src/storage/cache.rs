use super::error::StorageError;
use super::kv::KeyValueStore;
use crate::model::CachedFields;

/// Storage key under which the last submitted fields are kept.
pub const CACHE_KEY: &str = "logSheetCache";

/// Loads the cached fields.
///
/// Best effort: a missing entry, an unreadable store and an unparseable entry
/// all come back as `None`.
pub fn load_cache(store: &dyn KeyValueStore) -> Option<CachedFields> {
    let raw = match store.get(CACHE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "could not read field cache");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(cached) => Some(cached),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparseable field cache");
            None
        }
    }
}

/// Saves the cached fields. Failures are logged and otherwise ignored.
pub fn save_cache(store: &dyn KeyValueStore, fields: &CachedFields) {
    let result = serde_json::to_string(fields)
        .map_err(StorageError::from)
        .and_then(|raw| store.set(CACHE_KEY, &raw));
    if let Err(e) = result {
        tracing::warn!(error = %e, "could not write field cache");
    }
}
