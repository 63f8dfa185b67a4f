use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::handler::{AuthParams, FetchOptions, Handler, Post};
use crate::registry::{self, HandlerRegistry};

/// Fetches posts for one platform through its registered handler.
///
/// The handler is resolved once, at construction.  If that fails the manager
/// still exists: `error()` says why and every fetch fails fast.
pub struct FeedManager {
    platform: String,
    handler: Option<Box<dyn Handler>>,
    /// Outcome of the most recent operation; empty means success.
    error: String,
    /// Epoch seconds of the last successful fetch.  Nothing records it yet,
    /// so it stays `None`.
    last_fetch_date: Option<i64>,
}

impl FeedManager {
    /// Resolve `platform` against the process-wide registry.
    pub fn new(platform: impl Into<String>, auth: &AuthParams) -> Self {
        let platform = platform.into();
        let handler = registry::resolve_handler(&platform, auth);
        Self::from_resolution(platform, handler)
    }

    /// Resolve `platform` against an explicit registry.
    pub fn with_registry(
        platform: impl Into<String>,
        auth: &AuthParams,
        registry: &HandlerRegistry,
    ) -> Self {
        let platform = platform.into();
        let handler = registry.resolve(&platform, auth);
        Self::from_resolution(platform, handler)
    }

    fn from_resolution(platform: String, handler: Option<Box<dyn Handler>>) -> Self {
        let error = match handler {
            Some(_) => {
                debug!(platform = %platform, "handler resolved");
                String::new()
            }
            None => {
                let err = FetchError::HandlerNotFound {
                    platform: platform.clone(),
                };
                warn!(platform = %platform, "no handler registered");
                err.to_string()
            }
        };

        Self {
            platform,
            handler,
            error,
            last_fetch_date: None,
        }
    }

    /// Fetch recent posts from `endpoint` through the platform handler.
    ///
    /// Makes at most one handler call.  The result is the handler's, passed
    /// through untouched; an empty list is a success.  Afterwards
    /// [`error()`](Self::error) mirrors the handler's error state.  Without a
    /// handler this fails immediately and leaves `error()` as it was.
    pub fn fetch_posts(
        &mut self,
        endpoint: &str,
        options: &FetchOptions,
        auth: &AuthParams,
    ) -> Result<Vec<Post>, FetchError> {
        let Some(handler) = self.handler.as_mut() else {
            return Err(FetchError::HandlerNotFound {
                platform: self.platform.clone(),
            });
        };

        let result = handler.fetch(endpoint, options, auth);
        self.error = handler.error().to_string();

        match result {
            Ok(posts) => {
                info!(platform = %self.platform, endpoint, count = posts.len(), "fetched posts");
                Ok(posts)
            }
            Err(e) => {
                // A handler that fails without recording why still gets a message.
                if self.error.is_empty() {
                    self.error = format!("{e:#}");
                }
                warn!(platform = %self.platform, endpoint, error = %self.error, "fetch failed");
                Err(FetchError::Backend(self.error.clone()))
            }
        }
    }

    /// Posts the handler currently holds; empty without a handler.
    ///
    /// Never fetches.
    pub fn posts(&self) -> Vec<Post> {
        self.handler
            .as_ref()
            .map(|h| h.posts())
            .unwrap_or_default()
    }

    pub fn last_fetch_date(&self) -> Option<i64> {
        self.last_fetch_date
    }

    /// Message from the most recent operation, or `""`.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
