//! In-memory storage backend.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, is_valid_key};

/// Storage backed by a shared in-process map.
///
/// Cloning is cheap and clones share the same map, so a test can hand one
/// clone to the app and inspect the other. Nothing survives process exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().map_or(0, |map| map.len())
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, key: &str) -> Option<String> {
        if !is_valid_key(key) {
            tracing::warn!(key, "Rejected invalid storage key");
            return None;
        }
        let Ok(map) = self.inner.read() else {
            tracing::warn!(key, "Memory storage lock poisoned on read");
            return None;
        };
        map.get(key).cloned()
    }

    fn write(&self, key: &str, value: Option<&str>) -> bool {
        if !is_valid_key(key) {
            tracing::warn!(key, "Rejected invalid storage key");
            return false;
        }
        let Ok(mut map) = self.inner.write() else {
            tracing::warn!(key, "Memory storage lock poisoned on write");
            return false;
        };
        match value {
            Some(value) => {
                map.insert(key.to_owned(), value.to_owned());
            }
            None => {
                map.remove(key);
            }
        }
        true
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>> + Send {
        std::future::ready(self.read(key))
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = bool> + Send {
        std::future::ready(self.write(key, Some(value)))
    }

    fn remove(&self, key: &str) -> impl Future<Output = bool> + Send {
        std::future::ready(self.write(key, None))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[tokio::test]
    async fn test_get_unset_key_returns_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(keys::THEME_MODE).await, None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.set(keys::LANGUAGE, "fr").await);
        assert_eq!(storage.get(keys::LANGUAGE).await.as_deref(), Some("fr"));

        assert!(storage.remove(keys::LANGUAGE).await);
        assert_eq!(storage.get(keys::LANGUAGE).await, None);
        assert!(storage.remove(keys::LANGUAGE).await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();
        storage.set(keys::CART, "[]").await;
        assert_eq!(observer.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_key_is_swallowed() {
        let storage = MemoryStorage::new();
        assert!(!storage.set("bad key", "x").await);
        assert_eq!(storage.get("bad key").await, None);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let storage = MemoryStorage::new();
        assert!(storage.set_json(keys::USER_DATA, &vec![1, 2, 3]).await);
        let back: Option<Vec<i32>> = storage.get_json(keys::USER_DATA).await;
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_undecodable_json_is_absent() {
        let storage = MemoryStorage::new();
        storage.set(keys::USER_DATA, "{not json").await;
        let back: Option<Vec<i32>> = storage.get_json(keys::USER_DATA).await;
        assert!(back.is_none());
    }
}
