//! Platform name → handler factory lookup.
//!
//! Each platform is registered under a canonical key (the ASCII-lowercased
//! platform name) and looked up by exact match on that key.  A process-wide
//! registry, seeded with the built-in handlers, backs [`FeedManager::new`];
//! additional platforms can be added to it at startup with
//! [`register_handler`].
//!
//! [`FeedManager::new`]: crate::FeedManager::new

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use tracing::debug;

use crate::handler::{AuthParams, Handler, MastodonHandler};

/// Builds a handler from the caller's auth parameters.  Must not do I/O.
pub type HandlerFactory = Arc<dyn Fn(&AuthParams) -> Box<dyn Handler> + Send + Sync>;

lazy_static! {
    static ref GLOBAL: RwLock<HandlerRegistry> = RwLock::new(HandlerRegistry::with_builtin());
}

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every handler shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("mastodon", |auth: &AuthParams| {
            Box::new(MastodonHandler::new(auth.clone())) as Box<dyn Handler>
        });
        registry
    }

    /// Register (or replace) the factory for `platform`.
    pub fn register<F>(&mut self, platform: &str, factory: F)
    where
        F: Fn(&AuthParams) -> Box<dyn Handler> + Send + Sync + 'static,
    {
        let key = canonical(platform);
        debug!(platform = %key, "registering handler");
        self.factories.insert(key, Arc::new(factory));
    }

    pub fn contains(&self, platform: &str) -> bool {
        self.factories.contains_key(&canonical(platform))
    }

    /// Registered platform keys, sorted.
    pub fn platforms(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.factories.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Instantiate the handler for `platform`, if one is registered.
    pub fn resolve(&self, platform: &str, auth: &AuthParams) -> Option<Box<dyn Handler>> {
        self.factories
            .get(&canonical(platform))
            .map(|factory| factory(auth))
    }
}

/// Add a platform to the process-wide registry.
pub fn register_handler<F>(platform: &str, factory: F)
where
    F: Fn(&AuthParams) -> Box<dyn Handler> + Send + Sync + 'static,
{
    // A poisoned lock only means another registration panicked; the map
    // itself is still consistent.
    let mut registry = GLOBAL.write().unwrap_or_else(|e| e.into_inner());
    registry.register(platform, factory);
}

/// Resolve `platform` against the process-wide registry.
pub fn resolve_handler(platform: &str, auth: &AuthParams) -> Option<Box<dyn Handler>> {
    // Clone the factory out so it runs without holding the lock.
    let factory = {
        let registry = GLOBAL.read().unwrap_or_else(|e| e.into_inner());
        registry.factories.get(&canonical(platform)).cloned()
    };
    factory.map(|factory| factory(auth))
}

/// Platforms known to the process-wide registry, sorted.
pub fn registered_platforms() -> Vec<String> {
    GLOBAL.read().unwrap_or_else(|e| e.into_inner()).platforms()
}

fn canonical(platform: &str) -> String {
    platform.to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
