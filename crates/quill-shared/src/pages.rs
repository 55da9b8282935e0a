//! View data, one variant per page.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use quill_core::{Post, PostId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub year: i32,
}

/// A post as presented to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub id_str: String,
    pub title: String,
    pub author: String,
    pub url_friendly_link: Option<String>,
    pub content_html: String,
    pub formatted_created: String,
    pub formatted_edited: String,
    pub html5_created: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            id_str: post.id_str(),
            title: post.title.clone(),
            author: post.author.clone(),
            url_friendly_link: post.url_friendly_link.clone(),
            content_html: post.content_html.clone(),
            formatted_created: post.formatted_created(),
            formatted_edited: post.formatted_edited(),
            html5_created: post.html5_created(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPageData {
    pub header: Header,
    pub footer: Footer,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPageData {
    pub header: Header,
    pub footer: Footer,
    pub post: PostView,
}

/// Editor view: carries the markdown source alongside the rendered post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPageData {
    pub header: Header,
    pub footer: Footer,
    pub post: PostView,
    pub content_markdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPageData {
    pub header: Header,
    pub footer: Footer,
}

/// Data for every page the blog renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageData {
    Index(IndexPageData),
    View(ViewPageData),
    Edit(EditPageData),
    Add(AddPageData),
}

fn chrome(title: impl Into<String>, now: DateTime<Utc>) -> (Header, Footer) {
    (
        Header {
            title: title.into(),
        },
        Footer { year: now.year() },
    )
}

impl PageData {
    /// Posts are expected in index order already.
    pub fn index(posts: &[Post], now: DateTime<Utc>) -> Self {
        let (header, footer) = chrome("All posts", now);
        PageData::Index(IndexPageData {
            header,
            footer,
            posts: posts.iter().map(PostView::from).collect(),
        })
    }

    pub fn view(post: &Post, now: DateTime<Utc>) -> Self {
        let (header, footer) = chrome(post.title.clone(), now);
        PageData::View(ViewPageData {
            header,
            footer,
            post: PostView::from(post),
        })
    }

    pub fn edit(post: &Post, now: DateTime<Utc>) -> Self {
        let (header, footer) = chrome(format!("Edit: {}", post.title), now);
        PageData::Edit(EditPageData {
            header,
            footer,
            post: PostView::from(post),
            content_markdown: post.content_markdown.clone(),
        })
    }

    pub fn add(now: DateTime<Utc>) -> Self {
        let (header, footer) = chrome("New post", now);
        PageData::Add(AddPageData { header, footer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Post {
        let created = Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap();
        let mut post = Post::new(12, "alice", created);
        post.title = "Hello".to_string();
        post.content_markdown = "# Hello".to_string();
        post.compile(created);
        post
    }

    #[test]
    fn test_view_page_is_tagged() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(PageData::view(&sample(), now)).unwrap();

        assert_eq!(json["page"], "view");
        assert_eq!(json["header"]["title"], "Hello");
        assert_eq!(json["footer"]["year"], 2025);
        assert_eq!(json["post"]["id_str"], "12");
        assert_eq!(json["post"]["html5_created"], "2024-03-04");
        assert_eq!(json["post"]["content_html"], "<h1>Hello</h1>\n");
    }

    #[test]
    fn test_index_keeps_given_order() {
        let mut second = sample();
        second.id = 13;
        let page = PageData::index(&[second, sample()], Utc::now());

        let PageData::Index(data) = page else {
            panic!("expected index page");
        };
        assert_eq!(data.header.title, "All posts");
        let ids: Vec<PostId> = data.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![13, 12]);
    }

    #[test]
    fn test_edit_page_carries_markdown() {
        let PageData::Edit(data) = PageData::edit(&sample(), Utc::now()) else {
            panic!("expected edit page");
        };
        assert_eq!(data.content_markdown, "# Hello");
        assert_eq!(data.header.title, "Edit: Hello");
    }
}
