//! Stored encoding of posts: self-describing JSON.
//!
//! Unknown fields are ignored and missing ones take their defaults, so
//! records written by older or newer versions still decode.

use quill_core::domain::compile_markdown;
use quill_core::{Post, PostId};

pub fn encode(post: &Post) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(post)
}

/// Decode the post stored under `id`'s key.
///
/// The key is the post's identity: the `id` inside the record is
/// overwritten with it. `content_html` is only a cache, so a record that
/// lacks it gets it rebuilt from the markdown. A blank slug reads as none.
pub fn decode(id: PostId, bytes: &[u8]) -> Result<Post, serde_json::Error> {
    let mut post: Post = serde_json::from_slice(bytes)?;
    post.id = id;
    post.url_friendly_link = post
        .url_friendly_link
        .filter(|slug| !slug.trim().is_empty());
    if post.content_html.is_empty() && !post.content_markdown.is_empty() {
        post.content_html = compile_markdown(&post.content_markdown);
    }
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Post {
        let created = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let mut post = Post::new(3, "alice", created);
        post.title = "Hello".to_string();
        post.url_friendly_link = Some("hello".to_string());
        post.content_markdown = "# Hello\n\nworld".to_string();
        post.compile(created + chrono::Duration::seconds(30));
        post
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let post = sample();
        let decoded = decode(post.id, &encode(&post).unwrap()).unwrap();
        assert_eq!(decoded, post);
    }

    #[test]
    fn test_uses_stored_field_names() {
        let value: serde_json::Value = serde_json::from_slice(&encode(&sample()).unwrap()).unwrap();
        assert_eq!(value["id"], 3);
        assert!(value.get("date_edited_html").is_some());
        assert!(value.get("content_markdown").is_some());
    }

    #[test]
    fn test_old_record_without_html_is_recompiled() {
        let raw = br##"{"id":9,"title":"Old","content_markdown":"# Old"}"##;
        let post = decode(9, raw).unwrap();
        assert_eq!(post.id, 9);
        assert_eq!(post.content_html, "<h1>Old</h1>\n");
        assert!(post.url_friendly_link.is_none());
    }

    #[test]
    fn test_id_comes_from_the_key() {
        let without_id = br#"{"title":"old","content_markdown":"x"}"#;
        assert_eq!(decode(5, without_id).unwrap().id, 5);

        let other_id = br#"{"id":9,"title":"moved"}"#;
        assert_eq!(decode(2, other_id).unwrap().id, 2);
    }

    #[test]
    fn test_blank_slug_reads_as_none() {
        let raw = br#"{"id":1,"title":"t","url_friendly_link":""}"#;
        assert!(decode(1, raw).unwrap().url_friendly_link.is_none());

        let raw = br#"{"id":1,"title":"t","url_friendly_link":"  "}"#;
        assert!(decode(1, raw).unwrap().url_friendly_link.is_none());

        let raw = br#"{"id":1,"title":"t","url_friendly_link":"hello"}"#;
        assert_eq!(
            decode(1, raw).unwrap().url_friendly_link.as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw = br#"{"id":1,"title":"t","reactions":{"likes":4}}"#;
        assert_eq!(decode(1, raw).unwrap().title, "t");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode(1, b"\x00\x01not json").is_err());
        assert!(decode(7, br#"{"id":"seven"}"#).is_err());
    }
}
