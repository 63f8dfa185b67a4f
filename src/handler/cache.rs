//! Time-boxed on-disk cache for raw API responses.
//!
//! One file per cache key, named after the SHA-256 of the key.  Callers put
//! everything that shapes the response into the key (the Mastodon handler
//! uses the final request URL and a digest of the bearer token).  Freshness
//! is judged from the file's modification time, so there is no index to keep
//! in sync.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use sha2::{Digest, Sha256};
use tracing::debug;

pub struct FeedCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// A zero TTL or an empty directory turns the cache off.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && !self.dir.as_os_str().is_empty()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the entry for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.dir.join(format!("{digest}.json"))
    }

    /// Return the cached body for `key` if it was written less than `ttl`
    /// before `now`.
    ///
    /// Missing, unreadable and expired entries all come back as `None`.
    pub fn load_fresh(&self, key: &str, now: SystemTime) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        let path = self.path_for(key);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        // A modification time in the future counts as age zero.
        let age = now.duration_since(modified).unwrap_or_default();
        if age >= self.ttl {
            debug!(path = %path.display(), age_secs = age.as_secs(), "cache entry expired");
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cache entry unreadable");
                None
            }
        }
    }

    /// Write `body` as the entry for `key`, creating the directory if needed.
    pub fn store(&self, key: &str, body: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, body)?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
