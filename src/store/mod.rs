//! Key/value persistence for user-managed lists
//!
//! - `FileStorage`: one JSON file per key under the data directory
//! - `MemoryStorage`: in-process map, used by tests and ephemeral sessions
//!
//! Entry lists are stored as a JSON array under a versioned key.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Entry;

/// Storage key for the torrent list
pub const TORRENTS_KEY: &str = "torrents.v1";

/// Errors from storage access and decoding
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("stored data for '{key}' is not valid JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored data for '{0}' is not a JSON array")]
    NotAnArray(String),
}

/// Synchronous string key/value store
pub trait Storage {
    /// Read a value, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load entries stored under `key`
///
/// Array items that do not decode as entries are skipped. Missing or
/// duplicate ids are replaced with fresh ones so ids stay unique.
pub fn load_entries(storage: &dyn Storage, key: &str) -> Result<Vec<Entry>, StoreError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(Vec::new());
    };

    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;

    let serde_json::Value::Array(items) = value else {
        return Err(StoreError::NotAnArray(key.to_string()));
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let mut entry: Entry = match serde_json::from_value(item) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, position, error = %e, "skipping malformed stored entry");
                continue;
            }
        };

        if entry.id.is_empty() || !seen.insert(entry.id.clone()) {
            let fresh = Entry::generate_id();
            debug!(key, old = %entry.id, new = %fresh, "reassigning entry id");
            entry.id = fresh;
            seen.insert(entry.id.clone());
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Load entries, falling back to an empty list on any failure
pub fn load_entries_or_default(storage: &dyn Storage, key: &str) -> Vec<Entry> {
    match load_entries(storage, key) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, error = %e, "stored list unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Persist entries under `key`
pub fn save_entries(storage: &mut dyn Storage, key: &str, entries: &[Entry]) -> Result<(), StoreError> {
    let json = serde_json::to_string(entries).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_loads_empty() {
        let storage = MemoryStorage::new();
        assert!(load_entries(&storage, TORRENTS_KEY).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut favorite = Entry::torrent("Sintel", "https://example.org/sintel.torrent");
        favorite.is_favorite = true;
        let entries = vec![Entry::torrent("Movie", "magnet:?xt=urn:btih:ABC"), favorite];

        save_entries(&mut storage, TORRENTS_KEY, &entries).unwrap();
        let loaded = load_entries(&storage, TORRENTS_KEY).unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_malformed_json_is_an_error_but_defaults_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(TORRENTS_KEY, "{not json").unwrap();

        assert!(matches!(
            load_entries(&storage, TORRENTS_KEY),
            Err(StoreError::Json { .. })
        ));
        assert!(load_entries_or_default(&storage, TORRENTS_KEY).is_empty());
    }

    #[test]
    fn test_non_array_is_rejected() {
        let mut storage = MemoryStorage::new();
        storage.set(TORRENTS_KEY, r#"{"id":"x"}"#).unwrap();

        assert!(matches!(
            load_entries(&storage, TORRENTS_KEY),
            Err(StoreError::NotAnArray(_))
        ));
        assert!(load_entries_or_default(&storage, TORRENTS_KEY).is_empty());
    }

    #[test]
    fn test_bad_items_are_skipped() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                TORRENTS_KEY,
                r#"[null, 42, {"id":"a","name":"Ok","url":"magnet:?x"}]"#,
            )
            .unwrap();

        let loaded = load_entries(&storage, TORRENTS_KEY).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Ok");
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                TORRENTS_KEY,
                r#"[{"id":"a","name":"Movie","url":"magnet:?x","group":null,"isFavorite":null,"logo":null}]"#,
            )
            .unwrap();

        let loaded = load_entries(&storage, TORRENTS_KEY).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Movie");
        assert_eq!(loaded[0].group, "");
        assert!(!loaded[0].is_favorite);
        assert!(loaded[0].logo.is_none());
    }

    #[test]
    fn test_null_id_is_repaired() {
        let mut storage = MemoryStorage::new();
        storage
            .set(TORRENTS_KEY, r#"[{"id":null,"name":"Movie","url":"magnet:?x"}]"#)
            .unwrap();

        let loaded = load_entries(&storage, TORRENTS_KEY).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].id.starts_with("tw-"));
    }

    #[test]
    fn test_missing_and_duplicate_ids_are_repaired() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                TORRENTS_KEY,
                r#"[{"id":"a","url":"magnet:?1"},{"id":"a","url":"magnet:?2"},{"url":"magnet:?3"}]"#,
            )
            .unwrap();

        let loaded = load_entries(&storage, TORRENTS_KEY).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].id, "a");
        assert_ne!(loaded[1].id, "a");
        assert!(!loaded[2].id.is_empty());
        let ids: HashSet<_> = loaded.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 3);
    }
}
