use quill_core::PostId;

/// Key layout for posts and the post counter.
///
/// With the default prefix `bp`, post 7 lives at `bp::7` and the counter
/// at `bp::count`.
#[derive(Debug, Clone)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn post(&self, id: PostId) -> String {
        format!("{}::{}", self.prefix, id)
    }

    pub fn counter(&self) -> String {
        format!("{}::count", self.prefix)
    }

    /// Every id the counter has handed out, `1..=count`, with its key.
    pub fn posts_up_to(&self, count: PostId) -> Vec<(PostId, String)> {
        (1..=count).map(|id| (id, self.post(id))).collect()
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new("bp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let keys = KeySpace::default();
        assert_eq!(keys.post(7), "bp::7");
        assert_eq!(keys.counter(), "bp::count");
    }

    #[test]
    fn test_posts_up_to() {
        let keys = KeySpace::new("blog");
        assert_eq!(
            keys.posts_up_to(3),
            vec![
                (1, "blog::1".to_string()),
                (2, "blog::2".to_string()),
                (3, "blog::3".to_string()),
            ]
        );
        assert!(keys.posts_up_to(0).is_empty());
    }
}
