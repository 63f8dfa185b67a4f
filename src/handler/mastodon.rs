//! Mastodon handler implementation.
//!
//! Works against any server speaking the Mastodon REST API for status lists
//! (`/api/v1/timelines/public`, `/api/v1/accounts/:id/statuses`, tag
//! timelines, and compatible Pleroma / GoToSocial endpoints).  Use it as a
//! template when adding another platform.
//!
//! Responses are cached verbatim through [`FeedCache`] when the caller's
//! [`FetchOptions`] enable it, so a cache hit goes through exactly the same
//! parsing as a network response.

use std::time::{Duration, SystemTime};

use anyhow::{anyhow, bail, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::cache::FeedCache;
use super::{AuthParams, FetchOptions, Handler, Post};

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Transport timeout for a single timeline request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A handler for Mastodon-compatible servers.
pub struct MastodonHandler {
    /// Credentials given at construction; per-call ones take precedence.
    auth: AuthParams,
    /// Building the client can fail (TLS backend setup); that is reported on
    /// the first fetch instead of at construction.
    client: std::result::Result<Client, String>,
    posts: Vec<Post>,
    error: String,
}

// Wire shapes, reduced to the fields we read.

#[derive(Deserialize)]
struct RawStatus {
    id: String,
    #[serde(default)]
    content: String,
    created_at: String,
    url: Option<String>,
    uri: Option<String>,
    account: RawAccount,
}

#[derive(Deserialize)]
struct RawAccount {
    #[serde(default)]
    username: String,
    #[serde(default)]
    display_name: String,
    avatar: Option<String>,
}

impl MastodonHandler {
    /// Create a handler.  Performs no I/O.
    pub fn new(auth: AuthParams) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"));

        Self {
            auth,
            client,
            posts: Vec::new(),
            error: String::new(),
        }
    }

    /// Parse a JSON array of statuses into at most `max_count` [`Post`]s.
    ///
    /// Pure function (no I/O) so that tests and the cache path can exercise
    /// the parsing without hitting the network.
    pub fn parse_statuses(body: &str, max_count: usize) -> Result<Vec<Post>> {
        let statuses: Vec<RawStatus> =
            serde_json::from_str(body).context("response is not a list of statuses")?;

        Ok(statuses
            .into_iter()
            .take(max_count)
            .map(|status| {
                let author_name = if status.account.display_name.trim().is_empty() {
                    status.account.username
                } else {
                    status.account.display_name
                };

                Post {
                    id: status.id,
                    content: strip_html(&status.content),
                    created_at: status.created_at,
                    url: status.url.or(status.uri).unwrap_or_default(),
                    author_name,
                    author_avatar: status.account.avatar.filter(|a| !a.is_empty()),
                }
            })
            .collect())
    }

    /// `endpoint` with its `limit` parameter replaced by `max_count`.
    ///
    /// Other query parameters are kept in order.
    fn request_url(endpoint: &str, max_count: usize) -> Result<Url> {
        let mut url =
            Url::parse(endpoint).with_context(|| format!("invalid endpoint URL {endpoint}"))?;

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "limit")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("limit", &max_count.to_string());

        Ok(url)
    }

    /// Cache key for one request: the final URL (limit included) plus a
    /// digest of the bearer token, so that responses are never shared
    /// across page sizes or accounts.
    fn cache_key(url: &Url, token: Option<&str>) -> String {
        let account = token
            .map(|t| hex::encode(Sha256::digest(t.as_bytes())))
            .unwrap_or_default();
        format!("{url}\n{account}")
    }

    fn load(&self, endpoint: &str, options: &FetchOptions, auth: &AuthParams) -> Result<Vec<Post>> {
        let url = Self::request_url(endpoint, options.max_count)?;
        let token = auth.token().or_else(|| self.auth.token());
        let key = Self::cache_key(&url, token);
        let cache = FeedCache::new(&options.cache_dir, options.cache_delay);

        if let Some(body) = cache.load_fresh(&key, SystemTime::now()) {
            match Self::parse_statuses(&body, options.max_count) {
                Ok(posts) => {
                    debug!(endpoint, count = posts.len(), "served from cache");
                    return Ok(posts);
                }
                Err(e) => warn!(endpoint, error = %e, "discarding unparseable cache entry"),
            }
        }

        let body = self.request(endpoint, url, token)?;
        let posts = Self::parse_statuses(&body, options.max_count)?;

        if cache.is_enabled() {
            let path = cache.store(&key, &body).with_context(|| {
                format!("failed to write cache in {}", cache.dir().display())
            })?;
            debug!(path = %path.display(), "cached response");
        }

        Ok(posts)
    }

    fn request(&self, endpoint: &str, url: Url, token: Option<&str>) -> Result<String> {
        let client = self.client.as_ref().map_err(|e| anyhow!("{e}"))?;

        info!(endpoint, url = %url, "fetching Mastodon statuses");
        let mut req = client.get(url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let res = req
            .send()
            .with_context(|| format!("request to {endpoint} failed"))?;

        let status = res.status();
        if !status.is_success() {
            bail!("HTTP {status} from {endpoint}");
        }

        res.text()
            .with_context(|| format!("failed to read response from {endpoint}"))
    }
}

impl Handler for MastodonHandler {
    fn fetch(
        &mut self,
        endpoint: &str,
        options: &FetchOptions,
        auth: &AuthParams,
    ) -> Result<Vec<Post>> {
        self.error.clear();

        match self.load(endpoint, options, auth) {
            Ok(posts) => {
                self.posts = posts.clone();
                Ok(posts)
            }
            Err(e) => {
                // Previously fetched posts stay available as stale data.
                self.error = format!("{e:#}");
                Err(e)
            }
        }
    }

    fn posts(&self) -> Vec<Post> {
        self.posts.clone()
    }

    fn error(&self) -> &str {
        &self.error
    }
}

/// Reduce status HTML to plain text.
///
/// Decodes the named entities Mastodon emits plus any numeric
/// (`&#8217;`, `&#x27;`) reference.
fn strip_html(html: &str) -> String {
    lazy_static! {
        static ref PARAGRAPH: Regex = Regex::new(r"(?i)</p>\s*<p[^>]*>").unwrap();
        static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
        static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
        static ref NUMERIC_ENTITY: Regex =
            Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").unwrap();
    }

    let text = PARAGRAPH.replace_all(html, "\n\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");

    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");

    let text = NUMERIC_ENTITY.replace_all(&text, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        // Out-of-range references are left as written.
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    text.replace("&amp;", "&").trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
