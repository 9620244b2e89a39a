//! File-backed local device storage
//!
//! A single JSON file of key/value pairs, read once at open and rewritten
//! whole on every set. Matches browser localStorage semantics: synchronous,
//! best-effort, last-write-wins between concurrent writers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::config::DeviceConfig;
use crate::services::DeviceStore;

/// Device storage persisted as a JSON file
pub struct FileDeviceStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileDeviceStore {
    /// Open the store, loading existing entries.
    ///
    /// A missing or unreadable file yields an empty store; this is a fresh
    /// device, not an error.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Open the store at the configured path
    pub fn from_config(config: &DeviceConfig) -> Self {
        Self::open(&config.store_path)
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode device store: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, raw) {
            warn!("Failed to write device store {}: {e}", self.path.display());
        }
    }
}

impl DeviceStore for FileDeviceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or(None)
    }

    fn set(&self, key: &str, value: &str) {
        let Ok(mut entries) = self.entries.lock() else {
            warn!("Device store lock poisoned; dropping write");
            return;
        };
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }
}
