//! Invalidation Use Case
//!
//! Drops cache entries after a domain mutation. With arguments, exactly one
//! key goes; without, every key under `{prefix}:` is swept.

use crate::store::KeyValueStore;
use aside_domain::{CacheArgs, CacheKey};
use tracing::debug;

/// Routes mutation notifications to key or prefix deletes
#[derive(Debug, Clone)]
pub struct InvalidationRouter {
    store: KeyValueStore,
}

impl InvalidationRouter {
    /// Create a router over `store`
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Invalidate the key for `args`, or the whole prefix when `args` is empty
    pub async fn invalidate(&self, prefix: &str, args: &CacheArgs) -> bool {
        if args.is_empty() {
            return self.invalidate_prefix(prefix).await;
        }
        let key = CacheKey::new(prefix, args);
        debug!(key = %key, "Invalidating cache key");
        self.store.delete(key.as_str()).await
    }

    /// Sweep every key stored under `prefix`
    ///
    /// The bare key `prefix` itself (a call made with no arguments) is not matched.
    pub async fn invalidate_prefix(&self, prefix: &str) -> bool {
        let pattern = CacheKey::sweep_pattern(prefix);
        debug!(pattern = %pattern, "Sweeping cache prefix");
        self.store.delete_matching(&pattern).await
    }

    /// Sweep several prefixes; true only if every sweep succeeded
    pub async fn invalidate_all<I, S>(&self, prefixes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all_succeeded = true;
        for prefix in prefixes {
            all_succeeded &= self.invalidate_prefix(prefix.as_ref()).await;
        }
        all_succeeded
    }
}
