//! The post type shared across all platform handlers.
//!
//! `Post` represents a single status fetched from any backend (Mastodon,
//! or whatever else gets registered).  Every handler converts its native
//! payload into `Post`s so the manager and its callers stay
//! platform-agnostic.
//!
//! ## For contributors
//!
//! If you are adding a new handler you do **not** need to modify this file
//! unless your platform requires extra fields.  Just construct `Post` values
//! in your handler's `fetch()` implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post, normalised from any platform.
///
/// The manager never builds, mutates or re-orders these: whatever the
/// handler returns is what the caller gets.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Platform-specific identifier (a Mastodon status id, for instance).
    pub id: String,

    /// Plain-text body.
    pub content: String,

    /// Creation timestamp exactly as the platform reported it.
    ///
    /// Kept as a string so that a handler never has to reject a post
    /// because of an odd date format.  See [`Post::published`].
    pub created_at: String,

    /// Public URL of the post.
    pub url: String,

    /// Display name of the author.
    pub author_name: String,

    /// Avatar URL of the author, if the platform exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
}

impl Post {
    /// Parse [`created_at`](Post::created_at) as an RFC 3339 timestamp.
    ///
    /// Returns `None` when the platform used some other format.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Shorthand constructor for tests.
    pub fn make_post(id: &str, created_at: &str) -> Post {
        Post {
            id: id.to_string(),
            content: format!("post {id}"),
            created_at: created_at.to_string(),
            url: format!("https://example.social/@alice/{id}"),
            author_name: "Alice".to_string(),
            author_avatar: None,
        }
    }

    #[test]
    fn published_parses_mastodon_timestamps() {
        let post = make_post("1", "2024-05-01T12:30:00.000Z");
        assert_eq!(
            post.published(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn published_normalises_offsets_to_utc() {
        let post = make_post("1", "2024-05-01T14:30:00+02:00");
        assert_eq!(
            post.published(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn published_is_none_for_unparseable_dates() {
        let post = make_post("1", "yesterday-ish");
        assert!(post.published().is_none());
    }

    #[test]
    fn missing_avatar_is_omitted_from_json() {
        let post = make_post("7", "2024-05-01T12:30:00Z");
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("author_avatar").is_none());

        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back, post);
    }
}
