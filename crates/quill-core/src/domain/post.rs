use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::markdown::compile_markdown;

/// Post identifier, handed out by the id allocator starting at 1.
pub type PostId = u64;

/// Post entity - a single blog post.
///
/// `content_html` is a cache of `content_markdown` and is only ever written
/// by [`Post::compile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub author: String,
    pub date_created: DateTime<Utc>,
    pub url_friendly_link: Option<String>,
    pub content_markdown: String,
    pub date_edited_markdown: DateTime<Utc>,
    pub content_html: String,
    #[serde(rename = "date_edited_html")]
    pub date_compiled_html: DateTime<Utc>,
}

impl Post {
    /// Create an empty post for a freshly allocated id.
    pub fn new(id: PostId, author: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            author: author.into(),
            date_created: now,
            date_edited_markdown: now,
            date_compiled_html: now,
            ..Default::default()
        }
    }

    /// Recompile the HTML cache and stamp both edit timestamps with `now`.
    pub fn compile(&mut self, now: DateTime<Utc>) {
        self.content_html = compile_markdown(&self.content_markdown);
        self.date_edited_markdown = now;
        self.date_compiled_html = now;
    }

    pub fn id_str(&self) -> String {
        self.id.to_string()
    }

    /// e.g. `March 04, 2024 | Monday`
    pub fn formatted_created(&self) -> String {
        self.date_created.format("%B %d, %Y | %A").to_string()
    }

    /// e.g. `March 04, 2024 | Monday -- 17:05PM`
    pub fn formatted_edited(&self) -> String {
        self.date_edited_markdown
            .format("%B %d, %Y | %A -- %H:%M%p")
            .to_string()
    }

    /// Creation date as used by HTML5 `<time>` and date inputs.
    pub fn html5_created(&self) -> String {
        self.date_created.format("%Y-%m-%d").to_string()
    }

    /// Index page order: newest `date_created` first, then latest edit first,
    /// both compared in whole seconds. Full ties fall back to the higher id so
    /// listings are deterministic.
    pub fn index_order(a: &Post, b: &Post) -> Ordering {
        b.date_created
            .timestamp()
            .cmp(&a.date_created.timestamp())
            .then_with(|| {
                b.date_edited_markdown
                    .timestamp()
                    .cmp(&a.date_edited_markdown.timestamp())
            })
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// Sort posts the way the index page presents them.
pub fn sort_for_index(posts: &mut [Post]) {
    posts.sort_by(Post::index_order);
}
