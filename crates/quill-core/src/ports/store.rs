//! Key-value backing store port.

use std::collections::HashMap;

use async_trait::async_trait;

/// Key-value store trait - abstraction over storage backends (Redis, in-memory).
///
/// Implementations must be safe for concurrent use through a shared handle.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the value for a key. `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set a key, overwriting any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Fetch many keys in one request.
    /// The returned map only contains the keys that exist.
    async fn bulk_get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StoreError>;

    /// Atomically increment an integer counter and return the new value.
    /// A key that was never set starts at zero, so the first call returns 1.
    /// The counter is stored as decimal ASCII and is readable with [`KvStore::get`].
    async fn fetch_and_increment(&self, key: &str) -> Result<u64, StoreError>;
}

/// Store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    /// A counter key holds something other than a decimal integer.
    #[error("Value at {0} is not an integer")]
    NotAnInteger(String),
}
