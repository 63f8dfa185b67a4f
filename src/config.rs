//! TOML configuration for the command-line fetcher.
//!
//! ```toml
//! [auth]
//! access_token = "..."
//!
//! [fetch]
//! max_count = 10
//! cache_delay = 300      # seconds, 0 disables caching
//! cache_dir = "/var/cache/fedifeed"
//! ```
//!
//! Every table and key is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::handler::{AuthParams, FetchOptions};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthParams,
    pub fetch: FetchSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub max_count: usize,
    /// Seconds.
    pub cache_delay: u64,
    pub cache_dir: PathBuf,
}

impl Default for FetchSettings {
    fn default() -> Self {
        let defaults = FetchOptions::default();
        Self {
            max_count: defaults.max_count,
            cache_delay: defaults.cache_delay.as_secs(),
            cache_dir: defaults.cache_dir,
        }
    }
}

impl FetchSettings {
    pub fn to_options(&self) -> FetchOptions {
        FetchOptions {
            max_count: self.max_count,
            cache_delay: Duration::from_secs(self.cache_delay),
            cache_dir: self.cache_dir.clone(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
