use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::error::{Error, IoContext, Result};

use super::fs::remove;

/// Freshness rule for a cached file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expiry {
    /// Cached files stay fresh forever.
    #[default]
    Never,
    /// Cached files are always stale.
    Always,
    /// Files older than the given age are stale.
    After(Duration),
}

impl Expiry {
    /// Map a timeout in seconds: `None` or negative never expires, zero always does.
    pub fn from_secs(secs: Option<i64>) -> Self {
        match secs {
            None => Expiry::Never,
            Some(s) if s < 0 => Expiry::Never,
            Some(0) => Expiry::Always,
            Some(s) => Expiry::After(Duration::from_secs(s.unsigned_abs())),
        }
    }

    /// Map a cleaning age in seconds for [`clean_cache`]: `None`, zero or negative
    /// removes unconditionally, a positive value removes entries at least that old.
    pub fn for_cleaning(secs: Option<i64>) -> Self {
        match secs {
            Some(s) if s > 0 => Expiry::After(Duration::from_secs(s.unsigned_abs())),
            _ => Expiry::Always,
        }
    }
}

/// Per-user cache directory for `basename` (default `datutils`).
pub fn default_cache_dir(basename: Option<&str>) -> Result<PathBuf> {
    let base = dirs::cache_dir()
        .ok_or_else(|| Error::invalid("No cache directory available on this platform"))?;
    Ok(base.join(basename.unwrap_or(env!("CARGO_PKG_NAME"))))
}

/// Location of the cache entry for `key` (typically a URL) inside `store`
/// (the current directory when `None`). The file name is the SHA-256 hex digest of `key`.
pub fn cache_path(key: &str, store: Option<&Path>) -> PathBuf {
    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    store.unwrap_or(Path::new(".")).join(digest)
}

fn age(path: &Path) -> Result<Duration> {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .io_context(|| format!("Failed to stat {}", path.display()))?;
    Ok(SystemTime::now().duration_since(modified).unwrap_or(Duration::ZERO))
}

/// Whether `path` exists and is still fresh under `expiry`.
pub fn is_cached(path: &Path, expiry: Expiry) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    Ok(match expiry {
        Expiry::Never => true,
        Expiry::Always => false,
        Expiry::After(max) => {
            let age = age(path)?;
            debug!("[misc::cache] {} last modified {}s ago", path.display(), age.as_secs());
            age < max
        }
    })
}

/// Remove `path` when it is stale under `expiry`. Returns whether it was removed.
/// Build `expiry` with [`Expiry::for_cleaning`] to clean by age in seconds.
pub fn clean_cache(path: &Path, expiry: Expiry) -> Result<bool> {
    if !path.exists() || is_cached(path, expiry)? {
        return Ok(false);
    }
    warn!("[misc::cache] Removing stale cache entry {}", path.display());
    remove(path, true)
}
