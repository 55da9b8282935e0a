//! Form payloads submitted by the editor.

use serde::{Deserialize, Serialize};

/// Body of `POST /save/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavePostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markdown: String,
}

/// Body of `POST /add`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddPostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markdown: String,
    /// Optional url slug; blank means none.
    #[serde(default)]
    pub slug: Option<String>,
}

impl AddPostForm {
    pub fn slug(&self) -> Option<String> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
