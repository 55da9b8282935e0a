//! # Quill Shared
//!
//! Types exchanged with clients: submitted forms, per-page view data and
//! response envelopes.

pub mod dto;
pub mod pages;
pub mod response;

pub use pages::PageData;
pub use response::{ApiResponse, ErrorResponse};
