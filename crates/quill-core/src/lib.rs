//! # Quill Core
//!
//! The domain layer of the Quill blog engine.
//! Posts, their index ordering, markdown compilation and the ports that
//! storage and authentication adapters implement. No infrastructure here.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{Post, PostId};
pub use error::RepoError;
