//! fedifeed: a pluggable social-feed fetcher.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌─────────────┐ resolve  ┌─────────────┐  fetch()  ┌──────────────────┐
//! │ FeedManager │ ───────► │  registry   │           │ handler::Handler │
//! │  (manager)  │          │ (factories) │           │  e.g. Mastodon   │
//! └─────────────┘          └─────────────┘           └──────────────────┘
//!        │                                                 ▲      │
//!        └──────────────── fetch_posts() ──────────────────┘      ▼
//!                                                          handler::cache
//! ```
//!
//! * **`handler/`**: the `Handler` trait, the `Post` / `AuthParams` types,
//!   the on-disk response cache and concrete platforms (currently Mastodon).
//! * **`registry`**: maps platform names to handler factories.
//! * **`manager`**: resolves one handler per platform, forwards fetches and
//!   mirrors the handler's error state.
//! * **`config`**: TOML configuration used by the command-line fetcher.
//!
//! ```no_run
//! use fedifeed::{AuthParams, FeedManager, FetchOptions};
//!
//! let auth = AuthParams::with_access_token("token");
//! let mut manager = FeedManager::new("mastodon", &auth);
//! match manager.fetch_posts(
//!     "https://example.social/api/v1/timelines/public",
//!     &FetchOptions::default(),
//!     &auth,
//! ) {
//!     Ok(posts) => println!("{} posts", posts.len()),
//!     Err(_) => eprintln!("{}", manager.error()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod manager;
pub mod registry;

pub use error::FetchError;
pub use handler::{AuthParams, FetchOptions, Handler, MastodonHandler, Post};
pub use manager::FeedManager;
pub use registry::HandlerRegistry;
