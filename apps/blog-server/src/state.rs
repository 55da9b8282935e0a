//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use quill_core::ports::{AuthChecker, IdAllocator, KvStore, PostRepository};
use quill_infra::{CredentialList, InMemoryKvStore, KeySpace, KvIdAllocator, KvPostRepository};

use crate::config::{AppConfig, AuthConfig, StoreConfig};

/// Site-wide settings the handlers need when building links and challenges.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub prefix: String,
    pub realm: String,
}

impl SiteSettings {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }
}

/// Shared application state.
///
/// Built once at startup; every handle inside is safe to share across workers.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub ids: Arc<dyn IdAllocator>,
    pub auth: Arc<dyn AuthChecker>,
    pub site: SiteSettings,
    pub store_kind: &'static str,
}

impl AppState {
    /// Build the application state with the configured backends.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (store, store_kind) = build_store(&config.store).await?;
        let auth = load_credentials(&config.auth)?;

        let state = Self::from_parts(
            store,
            store_kind,
            KeySpace::new(config.store.key_prefix.clone()),
            Arc::new(auth),
            SiteSettings {
                prefix: config.blog_prefix.clone(),
                realm: config.auth.realm.clone(),
            },
        );

        tracing::info!(store = store_kind, prefix = %state.site.prefix, "Application state initialized");
        Ok(state)
    }

    /// Wire the repository and allocator over one shared store handle.
    pub fn from_parts(
        store: Arc<dyn KvStore>,
        store_kind: &'static str,
        keys: KeySpace,
        auth: Arc<dyn AuthChecker>,
        site: SiteSettings,
    ) -> Self {
        Self {
            posts: Arc::new(KvPostRepository::new(store.clone(), keys.clone())),
            ids: Arc::new(KvIdAllocator::new(store, keys)),
            auth,
            site,
            store_kind,
        }
    }
}

#[cfg(feature = "redis")]
async fn build_store(config: &StoreConfig) -> anyhow::Result<(Arc<dyn KvStore>, &'static str)> {
    use quill_infra::{RedisConfig, RedisKvStore};

    let Some(url) = &config.redis_url else {
        tracing::warn!("REDIS_URL not set. Posts are kept in memory and lost on restart.");
        return Ok((Arc::new(InMemoryKvStore::new()), "memory"));
    };

    let redis_config = RedisConfig {
        url: url.clone(),
        connect_timeout: std::time::Duration::from_secs(config.connect_timeout_secs),
    };

    match RedisKvStore::new(&redis_config).await {
        Ok(store) => Ok((Arc::new(store), "redis")),
        Err(e) if config.fallback_to_memory => {
            tracing::error!(
                "Failed to connect to Redis: {}. Using in-memory fallback.",
                e
            );
            Ok((Arc::new(InMemoryKvStore::new()), "memory"))
        }
        Err(e) => Err(e).context("connecting to Redis"),
    }
}

#[cfg(not(feature = "redis"))]
async fn build_store(config: &StoreConfig) -> anyhow::Result<(Arc<dyn KvStore>, &'static str)> {
    if config.redis_url.is_some() {
        tracing::warn!("REDIS_URL ignored: built without the redis feature");
    }
    tracing::info!("Running without redis feature - using in-memory store");
    Ok((Arc::new(InMemoryKvStore::new()), "memory"))
}

fn load_credentials(config: &AuthConfig) -> anyhow::Result<CredentialList> {
    match CredentialList::load(&config.credentials_file) {
        Ok(list) => {
            if list.is_empty() {
                tracing::warn!("Credentials file has no users; write routes will refuse everyone");
            }
            Ok(list)
        }
        Err(e) if config.allow_empty_credentials => {
            tracing::warn!(error = %e, "No credentials loaded; write routes will refuse everyone");
            Ok(CredentialList::empty())
        }
        Err(e) => Err(e).context("loading Basic Auth credentials"),
    }
}
