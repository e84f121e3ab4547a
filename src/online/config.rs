use std::{path::PathBuf, time::Duration};

use crate::error::Result;
use crate::misc::{default_cache_dir, Expiry};

/// Client settings for a [`Fetcher`](super::Fetcher).
#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_redirects: usize,
    /// Response caching; off unless set.
    pub cache: Option<CacheConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
            max_redirects: 10,
            cache: None,
        }
    }
}

impl FetchConfig {
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where and for how long response bodies are cached on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub store: PathBuf,
    pub expire: Expiry,
    /// Refetch even when a fresh entry exists.
    pub force: bool,
}

impl CacheConfig {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self { store: store.into(), expire: Expiry::Never, force: false }
    }

    /// Cache under the per-user cache directory.
    pub fn in_default_dir() -> Result<Self> {
        Ok(Self::new(default_cache_dir(None)?))
    }

    pub fn expire(mut self, expire: Expiry) -> Self {
        self.expire = expire;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
