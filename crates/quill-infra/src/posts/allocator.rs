use std::sync::Arc;

use async_trait::async_trait;

use quill_core::PostId;
use quill_core::error::RepoError;
use quill_core::ports::{IdAllocator, KvStore};

use super::keys::KeySpace;

/// Post id allocator backed by the store's atomic counter.
///
/// The counter is only ever incremented, so an id handed out once is never
/// seen again even if its post is deleted.
pub struct KvIdAllocator {
    store: Arc<dyn KvStore>,
    keys: KeySpace,
}

impl KvIdAllocator {
    pub fn new(store: Arc<dyn KvStore>, keys: KeySpace) -> Self {
        Self { store, keys }
    }
}

#[async_trait]
impl IdAllocator for KvIdAllocator {
    async fn next_id(&self) -> Result<PostId, RepoError> {
        let id = self
            .store
            .fetch_and_increment(&self.keys.counter())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Post id allocation failed"))?;

        tracing::debug!(post_id = id, "Allocated post id");
        Ok(id)
    }
}
