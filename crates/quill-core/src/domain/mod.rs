//! Domain entities - the core business objects.

mod markdown;
mod post;

pub use markdown::compile_markdown;
pub use post::{Post, PostId, sort_for_index};
