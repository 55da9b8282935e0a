//! Store doubles shared by the post tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use quill_core::ports::{KvStore, StoreError};

/// A store whose every call fails as if the server were unreachable.
pub struct DownStore;

fn down<T>() -> Result<T, StoreError> {
    Err(StoreError::Connection("connection refused".into()))
}

#[async_trait]
impl KvStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        down()
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
        down()
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        down()
    }

    async fn bulk_get(&self, _keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        down()
    }

    async fn fetch_and_increment(&self, _key: &str) -> Result<u64, StoreError> {
        down()
    }
}

/// Delegates to an inner store but fails every bulk read.
pub struct BulkDownStore {
    inner: Arc<dyn KvStore>,
}

impl BulkDownStore {
    pub fn new(inner: Arc<dyn KvStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl KvStore for BulkDownStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key).await
    }

    async fn bulk_get(&self, _keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        down()
    }

    async fn fetch_and_increment(&self, key: &str) -> Result<u64, StoreError> {
        self.inner.fetch_and_increment(key).await
    }
}
