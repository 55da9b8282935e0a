//! Repository-level error types.

use thiserror::Error;

use crate::domain::PostId;
use crate::ports::StoreError;

/// Errors surfaced by the id allocator and the post repository.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Backing store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Post {id} not found")]
    NotFound { id: PostId },

    #[error("Stored post {id} could not be decoded: {reason}")]
    Decode { id: PostId, reason: String },

    #[error("Post could not be encoded: {0}")]
    Encode(String),

    #[error("Post counter holds a non-integer value: {0}")]
    CorruptCounter(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound { .. })
    }
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotAnInteger(key) => RepoError::CorruptCounter(key),
            other => RepoError::StoreUnavailable(other.to_string()),
        }
    }
}
