//! Keyed data store
//!
//! Named textual artifacts produced by the vision pipeline, independent of
//! conversation instances. Entries live until explicitly cleared; there is
//! no eviction and no expiry.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

/// Companion key holding the serialized labels for an analysis
///
/// The labels entry has its own lifecycle: clearing the main key leaves it
/// behind, and callers clear it separately.
pub fn labels_key(key: &str) -> String {
    format!("{}_labels", key)
}

/// Key -> string artifact store
pub struct DataStore {
    entries: Mutex<HashMap<String, String>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store a value under `key`, replacing any previous value
    pub async fn put(&self, key: &str, value: impl Into<String>) {
        let value = value.into();
        debug!(%key, value_len = %value.len(), "put: called");
        self.entries.lock().await.insert(key.to_string(), value);
    }

    /// The stored value, or empty string if absent
    pub async fn get(&self, key: &str) -> String {
        self.entries.lock().await.get(key).cloned().unwrap_or_default()
    }

    /// Whether `key` currently holds a value
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    /// Remove `key` only; a paired labels entry is left untouched
    pub async fn clear(&self, key: &str) {
        debug!(%key, "clear: called");
        self.entries.lock().await.remove(key);
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
