//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod store;

pub use auth::{AuthChecker, AuthError, PasswordService};
pub use repository::{BaseRepository, IdAllocator, PostRepository};
pub use store::{KvStore, StoreError};
