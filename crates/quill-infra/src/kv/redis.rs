//! Redis key-value store with a managed, auto-reconnecting connection.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};

use quill_core::ports::{KvStore, StoreError};

/// Redis connection settings.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    pub connect_timeout: Duration,
}

/// Redis-backed key-value store.
///
/// `ConnectionManager` is a cheap clonable handle multiplexed over a single
/// connection, so every call clones it instead of taking a lock.
pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    pub async fn new(config: &RedisConfig) -> Result<Self, StoreError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| StoreError::Connection(e.to_string()))?;

        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Connection("Connection timed out".to_string()))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis store");

        Ok(Self { conn })
    }
}

fn store_error(err: RedisError) -> StoreError {
    if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Operation(err.to_string())
    }
}

/// `INCR` on a non-integer value answers `ERR value is not an integer`.
fn counter_error(key: &str, err: RedisError) -> StoreError {
    match err.detail() {
        Some(detail) if detail.contains("not an integer") => {
            StoreError::NotAnInteger(key.to_string())
        }
        _ => store_error(err),
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(store_error)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(store_error)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(store_error)
    }

    async fn bulk_get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        // MGET rejects an empty key list.
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn.clone();
        // Explicit MGET: the typed helper downgrades single keys to GET.
        let values: Vec<Option<Vec<u8>>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        Ok(keys
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key.clone(), v)))
            .collect())
    }

    async fn fetch_and_increment(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.incr::<_, _, u64>(key, 1u64)
            .await
            .map_err(|e| counter_error(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store() -> Option<RedisKvStore> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
        };

        RedisKvStore::new(&config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_set_get_delete() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let key = "quill_test::kv";
        store.set(key, b"value").await.unwrap();
        assert_eq!(store.get(key).await.unwrap(), Some(b"value".to_vec()));

        store.delete(key).await.unwrap();
        store.delete(key).await.unwrap();
        assert_eq!(store.get(key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_bulk_get_skips_missing() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        store.set("quill_test::bulk::1", b"one").await.unwrap();
        store.delete("quill_test::bulk::2").await.unwrap();
        store.set("quill_test::bulk::3", b"three").await.unwrap();

        let keys: Vec<String> = (1..=3).map(|i| format!("quill_test::bulk::{i}")).collect();
        let found = store.bulk_get(&keys).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found["quill_test::bulk::3"], b"three".to_vec());

        let single = store.bulk_get(&keys[..1]).await.unwrap();
        assert_eq!(single.len(), 1);
        assert!(store.bulk_get(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_redis_counter() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        let key = "quill_test::count";
        store.delete(key).await.unwrap();
        assert_eq!(store.fetch_and_increment(key).await.unwrap(), 1);
        assert_eq!(store.fetch_and_increment(key).await.unwrap(), 2);
        assert_eq!(store.get(key).await.unwrap(), Some(b"2".to_vec()));

        store.set(key, b"many").await.unwrap();
        assert!(matches!(
            store.fetch_and_increment(key).await.unwrap_err(),
            StoreError::NotAnInteger(_)
        ));
        store.delete(key).await.unwrap();
    }
}
