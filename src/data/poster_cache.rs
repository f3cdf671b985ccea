use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// The key a poster was resolved under: the trimmed IMDb id when the
/// record has one, otherwise the exact title string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Id(String),
    Title(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Id(id) => write!(f, "poster:id:{}", id),
            CacheKey::Title(title) => write!(f, "poster:title:{}", title),
        }
    }
}

/// A resolved poster URL and when the resolution happened.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPoster {
    pub url: String,
    pub resolved_at: DateTime<Utc>,
}

/// Process-lifetime poster cache, no eviction.
///
/// Cheap to clone; clones share one map. Concurrent sessions may race on
/// the same key; last writer wins, which is fine because poster URLs are
/// idempotent to recompute.
#[derive(Debug, Clone, Default)]
pub struct PosterCache {
    entries: Arc<RwLock<HashMap<CacheKey, CachedPoster>>>,
}

impl PosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CachedPoster> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: CacheKey, url: String) {
        let entry = CachedPoster {
            url,
            resolved_at: Utc::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
