//! In-memory key-value store - used as fallback when Redis is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{KvStore, StoreError};

/// In-memory store using a HashMap behind an async RwLock.
///
/// Counter increments run under the write lock, which makes them atomic
/// with respect to every other operation on the map.
/// Note: Data is lost on process restart.
pub struct InMemoryKvStore {
    store: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }

    async fn bulk_get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        let store = self.store.read().await;
        Ok(keys
            .iter()
            .filter_map(|key| store.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }

    async fn fetch_and_increment(&self, key: &str) -> Result<u64, StoreError> {
        let mut store = self.store.write().await;

        let current = match store.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))?,
            None => 0,
        };

        let next = current + 1;
        store.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryKvStore::new();
        store.set("key1", b"value1").await.unwrap();
        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryKvStore::new();
        store.set("key1", b"value1").await.unwrap();
        store.delete("key1").await.unwrap();
        store.delete("key1").await.unwrap();
        store.delete("never-set").await.unwrap();
        assert_eq!(store.get("key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bulk_get_returns_only_hits() {
        let store = InMemoryKvStore::new();
        store.set("a", b"1").await.unwrap();
        store.set("c", b"3").await.unwrap();

        let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let found = store.bulk_get(&keys).await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found.get("a"), Some(&b"1".to_vec()));
        assert_eq!(found.get("c"), Some(&b"3".to_vec()));
        assert!(!found.contains_key("b"));
    }

    #[tokio::test]
    async fn test_counter_starts_at_one_and_is_readable() {
        let store = InMemoryKvStore::new();
        assert_eq!(store.fetch_and_increment("count").await.unwrap(), 1);
        assert_eq!(store.fetch_and_increment("count").await.unwrap(), 2);
        assert_eq!(store.get("count").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_counter_rejects_non_integer_value() {
        let store = InMemoryKvStore::new();
        store.set("count", b"not a number").await.unwrap();
        let err = store.fetch_and_increment("count").await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnInteger(key) if key == "count"));
    }

    #[tokio::test]
    async fn test_concurrent_increments_never_collide() {
        let store = Arc::new(InMemoryKvStore::new());

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.fetch_and_increment("count").await.unwrap() })
            })
            .collect();

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap());
        }
        values.sort_unstable();

        assert_eq!(values, (1..=64).collect::<Vec<u64>>());
    }
}
