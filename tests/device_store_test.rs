//! Integration tests for file-backed device storage

mod common;

use std::sync::Arc;

use common::LIKE_KEY;
use uuid::Uuid;
use write_hub::config::DeviceConfig;
use write_hub::services::{DeviceStore, FileDeviceStore};
use write_hub::LikeRecord;

fn temp_store_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("write-hub-test-{}.json", Uuid::new_v4()))
}

/// Test: values survive a reopen of the backing file
#[test]
fn values_round_trip_through_the_file() {
    let path = temp_store_path();

    {
        let store = FileDeviceStore::open(&path);
        assert!(store.get(LIKE_KEY).is_none());
        store.set(LIKE_KEY, r#"["p1","p2"]"#);
        assert_eq!(store.get(LIKE_KEY).as_deref(), Some(r#"["p1","p2"]"#));
    }

    let reopened = FileDeviceStore::open(&path);
    assert_eq!(reopened.get(LIKE_KEY).as_deref(), Some(r#"["p1","p2"]"#));

    let _ = std::fs::remove_file(&path);
}

/// Test: the like record persists through the file store across "sessions"
#[test]
fn like_record_survives_reopen() {
    let path = temp_store_path();
    let config = DeviceConfig {
        store_path: path.display().to_string(),
        like_record_key: LIKE_KEY.to_string(),
    };

    {
        let device: Arc<dyn DeviceStore> = Arc::new(FileDeviceStore::from_config(&config));
        let mut record = LikeRecord::load(device, &config.like_record_key);
        record.record("p1");
    }

    let device: Arc<dyn DeviceStore> = Arc::new(FileDeviceStore::open(&path));
    let record = LikeRecord::load(device, LIKE_KEY);
    assert!(record.contains("p1"));
    assert!(!record.contains("p2"));

    let _ = std::fs::remove_file(&path);
}

/// Test: a corrupt backing file degrades to an empty store, never an error
#[test]
fn corrupt_file_degrades_to_empty() {
    let path = temp_store_path();
    std::fs::write(&path, "{definitely not json").expect("write fixture");

    let store = FileDeviceStore::open(&path);
    assert!(store.get(LIKE_KEY).is_none());

    // Writes still work and repair the file.
    store.set(LIKE_KEY, "[]");
    let reopened = FileDeviceStore::open(&path);
    assert_eq!(reopened.get(LIKE_KEY).as_deref(), Some("[]"));

    let _ = std::fs::remove_file(&path);
}
