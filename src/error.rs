use thiserror::Error;

/// Why [`FeedManager::fetch_posts`](crate::FeedManager::fetch_posts) failed.
///
/// The display text of each variant is exactly what the manager stores in
/// its `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No handler is registered for the platform.
    #[error("Handler for {platform} not found.")]
    HandlerNotFound { platform: String },

    /// The handler reported a failure; the message is passed through as is.
    #[error("{0}")]
    Backend(String),
}
