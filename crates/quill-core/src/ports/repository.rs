use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its id. Fails with `NotFound` if it does not exist.
    async fn find_by_id(&self, id: ID) -> Result<T, RepoError>;

    /// Save an entity, overwriting any previous version. Returns what was stored.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its id. Deleting a missing entity succeeds.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Every readable post, newest first.
    ///
    /// Deleted ids and records that fail to decode are skipped.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;
}

/// Hands out unique, monotonically increasing post ids.
#[async_trait]
pub trait IdAllocator: Send + Sync {
    /// Allocate the next id. Ids are never reused, even after a delete.
    async fn next_id(&self) -> Result<PostId, RepoError>;
}
