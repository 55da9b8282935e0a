//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! key-value stores, the KV-backed post repository and id allocator,
//! and credential checking for Basic Auth.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `auth` - Credential list with constant-time and Argon2 verification
//! - `redis` - Redis-backed key-value store

pub mod kv;
pub mod posts;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use kv::InMemoryKvStore;
pub use posts::{KeySpace, KvIdAllocator, KvPostRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, CredentialList};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use kv::{RedisConfig, RedisKvStore};
