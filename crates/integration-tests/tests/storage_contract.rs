//! Behavior shared by every storage backend.

#![allow(clippy::unwrap_used)]

use shopfront_integration_tests::TestContext;
use shopfront_storefront::storage::{FileStorage, KeyValueStore, MemoryStorage, keys};

async fn round_trips<S: KeyValueStore>(storage: &S) {
    assert_eq!(storage.get(keys::LANGUAGE).await, None);
    assert!(storage.set(keys::LANGUAGE, "es").await);
    assert_eq!(storage.get(keys::LANGUAGE).await.as_deref(), Some("es"));

    assert!(storage.set(keys::LANGUAGE, "de").await);
    assert_eq!(storage.get(keys::LANGUAGE).await.as_deref(), Some("de"));

    assert!(storage.remove(keys::LANGUAGE).await);
    assert_eq!(storage.get(keys::LANGUAGE).await, None);
    assert!(storage.remove(keys::LANGUAGE).await);
}

async fn json_values<S: KeyValueStore>(storage: &S) {
    let value = vec!["p1".to_string(), "p2".to_string()];
    assert!(storage.set_json(keys::WISHLIST, &value).await);
    assert_eq!(
        storage.get_json::<Vec<String>>(keys::WISHLIST).await,
        Some(value)
    );

    assert!(storage.set(keys::CART, "not json").await);
    assert_eq!(storage.get_json::<Vec<String>>(keys::CART).await, None);
}

async fn rejects_unsafe_keys<S: KeyValueStore>(storage: &S) {
    assert!(!storage.set("../escape", "x").await);
    assert!(!storage.set("", "x").await);
    assert_eq!(storage.get("../escape").await, None);
}

#[tokio::test]
async fn test_memory_backend() {
    let storage = MemoryStorage::new();
    round_trips(&storage).await;
    json_values(&storage).await;
    rejects_unsafe_keys(&storage).await;
}

#[tokio::test]
async fn test_file_backend() {
    let ctx = TestContext::new();
    let storage = ctx.storage();
    round_trips(&storage).await;
    json_values(&storage).await;
    rejects_unsafe_keys(&storage).await;
}

#[tokio::test]
async fn test_file_backend_survives_new_handle() {
    let ctx = TestContext::new();
    assert!(ctx.storage().set(keys::THEME_MODE, "dark").await);
    let reopened = FileStorage::new(&ctx.config.data_dir);
    assert_eq!(
        reopened.get(keys::THEME_MODE).await.as_deref(),
        Some("dark")
    );
}

#[tokio::test]
async fn test_unwritable_directory_fails_softly() {
    let ctx = TestContext::new();
    let blocker = ctx.path().join("blocker");
    std::fs::write(&blocker, "file, not dir").unwrap();

    let storage = FileStorage::new(&blocker);
    assert!(!storage.set(keys::CART, "[]").await);
    assert_eq!(storage.get(keys::CART).await, None);
}
