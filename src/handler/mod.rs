//! Platform handler abstraction layer.
//!
//! This module defines the [`Handler`] trait, the [`Post`] and
//! [`AuthParams`] types it works with, and the [`FetchOptions`] cache policy.
//! Concrete platform implementations live in sub-modules (currently only
//! [`mastodon`]).
//!
//! ## For contributors: adding a new platform
//!
//! 1. Create a new file in this directory (e.g. `bluesky.rs`).
//! 2. Define a struct (e.g. `BlueskyHandler`) and implement [`Handler`] for it.
//! 3. Add `mod bluesky;` below and re-export your struct in the `pub use` block.
//! 4. Register a factory for it in `registry::HandlerRegistry::with_builtin`
//!    (or call `registry::register_handler` at startup).
//!
//! The manager, the cache policy plumbing and the CLI are all
//! platform-agnostic.

mod auth;
pub mod cache;
pub mod mastodon;
mod post;

pub use auth::AuthParams;
pub use mastodon::MastodonHandler;
pub use post::Post;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// How many posts to ask for, and how (or whether) to cache them.
///
/// Handlers own the interpretation.  The conventions the built-in handlers
/// follow: a zero `cache_delay` or an empty `cache_dir` disables caching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Upper bound on the number of posts returned.
    pub max_count: usize,
    /// How long a cached response may be served before hitting the network.
    pub cache_delay: Duration,
    /// Where cached responses live.
    pub cache_dir: PathBuf,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_count: 5,
            cache_delay: Duration::from_secs(60),
            cache_dir: PathBuf::new(),
        }
    }
}

/// Trait that every platform handler must implement.
///
/// A handler is created once per manager (see `registry`) and then asked to
/// [`fetch()`](Handler::fetch) any number of times.  It is [`Send`] so the
/// owning manager can be moved to another thread.
///
/// ## Implementing a new handler
///
/// ```ignore
/// pub struct MyHandler { posts: Vec<Post>, error: String }
///
/// impl Handler for MyHandler {
///     fn fetch(&mut self, endpoint: &str, options: &FetchOptions, auth: &AuthParams)
///         -> Result<Vec<Post>> { todo!() }
///     fn posts(&self) -> Vec<Post> { self.posts.clone() }
///     fn error(&self) -> &str { &self.error }
/// }
/// ```
pub trait Handler: Send {
    /// Retrieve up to `options.max_count` recent posts from `endpoint`.
    ///
    /// Implementations do their own HTTP, caching and parsing.  On success
    /// the posts are retained for [`posts()`](Handler::posts) and
    /// [`error()`](Handler::error) becomes empty; on failure `error()`
    /// describes what went wrong.
    fn fetch(&mut self, endpoint: &str, options: &FetchOptions, auth: &AuthParams)
        -> Result<Vec<Post>>;

    /// Posts retained from the most recent successful fetch.
    ///
    /// Must not perform I/O.
    fn posts(&self) -> Vec<Post>;

    /// Outcome of the most recent operation; empty means success.
    fn error(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_documented_policy() {
        let opts = FetchOptions::default();
        assert_eq!(opts.max_count, 5);
        assert_eq!(opts.cache_delay, Duration::from_secs(60));
        assert!(opts.cache_dir.as_os_str().is_empty());
    }
}
