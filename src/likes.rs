//! Device-local record of already-liked posts
//!
//! Duplicate-prevention for the like counter is browser-scoped, not
//! account-scoped: the record lives in local device storage under one fixed
//! key, so clearing that storage (or liking from a second device) allows a
//! second increment. That approximation is part of the product contract, not
//! something this layer tries to repair.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::services::DeviceStore;

/// Set of post ids this device has already liked, persisted across sessions
pub struct LikeRecord {
    device: Arc<dyn DeviceStore>,
    key: String,
    liked: HashSet<String>,
}

impl LikeRecord {
    /// Load the record from device storage.
    ///
    /// An absent or corrupt stored value yields an empty record, never an
    /// error.
    pub fn load(device: Arc<dyn DeviceStore>, key: &str) -> Self {
        let liked = device
            .get(key)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .map(HashSet::from_iter)
            .unwrap_or_default();

        debug!("Loaded {} liked post ids", liked.len());

        Self {
            device,
            key: key.to_string(),
            liked,
        }
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.liked.contains(post_id)
    }

    /// Add a post id and persist the whole record.
    ///
    /// Persistence is write-through and last-write-wins; there is no lock
    /// against concurrent writers on the same device.
    pub fn record(&mut self, post_id: &str) {
        if !self.liked.insert(post_id.to_string()) {
            return;
        }

        let ids: Vec<&String> = self.liked.iter().collect();
        match serde_json::to_string(&ids) {
            Ok(raw) => self.device.set(&self.key, &raw),
            Err(e) => debug!("Failed to encode like record: {e}"),
        }
    }

    pub fn len(&self) -> usize {
        self.liked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryDeviceStore;

    #[test]
    fn empty_on_absent_value() {
        let device = Arc::new(MemoryDeviceStore::new());
        let record = LikeRecord::load(device, "userLikes");
        assert!(record.is_empty());
    }

    #[test]
    fn empty_on_corrupt_value() {
        let device = Arc::new(MemoryDeviceStore::new());
        device.set("userLikes", "{not json]");

        let record = LikeRecord::load(device, "userLikes");
        assert!(record.is_empty());
    }

    #[test]
    fn record_persists_and_reloads() {
        let device = Arc::new(MemoryDeviceStore::new());

        let mut record = LikeRecord::load(device.clone(), "userLikes");
        record.record("p1");
        record.record("p2");
        record.record("p1");
        assert_eq!(record.len(), 2);

        let reloaded = LikeRecord::load(device, "userLikes");
        assert!(reloaded.contains("p1"));
        assert!(reloaded.contains("p2"));
        assert_eq!(reloaded.len(), 2);
    }
}
