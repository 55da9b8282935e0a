//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix every blog route lives under, e.g. `/blog`.
    pub blog_prefix: String,
    pub store: StoreConfig,
    pub auth: AuthConfig,
}

/// Backing store selection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Redis URL; `None` runs on the in-memory store.
    pub redis_url: Option<String>,
    pub connect_timeout_secs: u64,
    pub fallback_to_memory: bool,
    /// Prefix of post and counter keys.
    pub key_prefix: String,
}

/// Basic Auth settings for write routes.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials_file: PathBuf,
    /// Start even if the credentials file is missing; writes are then refused.
    pub allow_empty_credentials: bool,
    pub realm: String,
}

fn flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let store = StoreConfig {
            redis_url: env::var("REDIS_URL").ok().filter(|u| !u.is_empty()),
            connect_timeout_secs: env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            fallback_to_memory: flag("REDIS_FALLBACK_TO_MEMORY", true),
            key_prefix: env::var("KEY_PREFIX").unwrap_or_else(|_| "bp".to_string()),
        };

        let auth = AuthConfig {
            credentials_file: env::var("CREDENTIALS_FILE")
                .unwrap_or_else(|_| "sec/users.txt".to_string())
                .into(),
            allow_empty_credentials: flag("ALLOW_EMPTY_CREDENTIALS", false),
            realm: env::var("AUTH_REALM").unwrap_or_else(|_| "quill".to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(40080),
            blog_prefix: normalize_prefix(
                &env::var("BLOG_PREFIX").unwrap_or_else(|_| "/blog".to_string()),
            ),
            store,
            auth,
        }
    }
}

/// `blog/` and `/blog/` both become `/blog`; an empty prefix stays empty.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
