use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use quill_core::domain::sort_for_index;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, KvStore, PostRepository};
use quill_core::{Post, PostId};

use super::codec;
use super::keys::KeySpace;

/// Post repository over a key-value store.
///
/// One key per post plus the shared counter key. Saves are unconditional
/// overwrites; there is no locking between concurrent writers.
pub struct KvPostRepository {
    store: Arc<dyn KvStore>,
    keys: KeySpace,
}

impl KvPostRepository {
    pub fn new(store: Arc<dyn KvStore>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Highest id ever allocated, or 0 before the first allocation.
    async fn allocated_count(&self) -> Result<PostId, RepoError> {
        let Some(raw) = self.store.get(&self.keys.counter()).await? else {
            return Ok(0);
        };

        std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.trim().parse::<PostId>().ok())
            .ok_or_else(|| RepoError::CorruptCounter(String::from_utf8_lossy(&raw).into_owned()))
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for KvPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Post, RepoError> {
        let raw = self
            .store
            .get(&self.keys.post(id))
            .await?
            .ok_or(RepoError::NotFound { id })?;

        codec::decode(id, &raw).map_err(|e| RepoError::Decode {
            id,
            reason: e.to_string(),
        })
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        post.compile(Utc::now());

        let raw = codec::encode(&post).map_err(|e| RepoError::Encode(e.to_string()))?;
        self.store.set(&self.keys.post(post.id), &raw).await?;

        tracing::debug!(post_id = post.id, bytes = raw.len(), "Post saved");
        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        self.store.delete(&self.keys.post(id)).await?;
        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for KvPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let count = self.allocated_count().await?;
        let wanted = self.keys.posts_up_to(count);
        let keys: Vec<String> = wanted.iter().map(|(_, key)| key.clone()).collect();
        let mut found = self.store.bulk_get(&keys).await?;

        let mut posts: Vec<Post> = wanted
            .into_iter()
            .filter_map(|(id, key)| {
                let raw = found.remove(&key)?;
                codec::decode(id, &raw)
                    .inspect_err(|e| {
                        tracing::warn!(key = %key, error = %e, "Skipping undecodable post")
                    })
                    .ok()
            })
            .collect();
        sort_for_index(&mut posts);

        tracing::debug!(count, listed = posts.len(), "Listed posts");
        Ok(posts)
    }
}
