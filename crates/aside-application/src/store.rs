//! Fail-open key/value store
//!
//! Wraps a [`KeyValueBackend`] so that no backend failure escapes: reads
//! degrade to "absent", writes and deletes report `false`. Every degraded call
//! is logged at `warn`.

use aside_domain::ports::{BoundedIncrement, KeyValueBackend};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Shared, fail-open handle to the configured backend
///
/// Cloning is cheap; all clones share one backend (and its connection pool).
#[derive(Clone, Debug)]
pub struct KeyValueStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl KeyValueStore {
    /// Wrap a concrete backend
    pub fn new<B: KeyValueBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend
    pub fn from_arc(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Name of the underlying backend
    pub fn provider_name(&self) -> &str {
        self.backend.provider_name()
    }

    /// Read `key`; any failure reads as absent
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Store read failed; treating as absent");
                None
            }
        }
    }

    /// Write `key` with an explicit positive TTL
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> bool {
        if ttl.is_zero() {
            warn!(key, "Refusing store write with zero TTL");
            return false;
        }
        match self.backend.set(key, value, ttl).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Store write failed; dropping");
                false
            }
        }
    }

    /// Overwrite a live `key` without touching its remaining lifetime
    ///
    /// False when the key had already expired (nothing is written) or the
    /// backend failed.
    pub async fn set_keep_ttl(&self, key: &str, value: &str) -> bool {
        match self.backend.set_keep_ttl(key, value).await {
            Ok(written) => {
                if !written {
                    debug!(key, "Store key gone before keep-TTL write; skipped");
                }
                written
            }
            Err(e) => {
                warn!(key, error = %e, "Store write failed; dropping");
                false
            }
        }
    }

    /// Delete `key`; deleting an absent key succeeds
    pub async fn delete(&self, key: &str) -> bool {
        match self.backend.delete(key).await {
            Ok(existed) => {
                debug!(key, existed, "Store key deleted");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "Store delete failed");
                false
            }
        }
    }

    /// Delete every key matching the glob `pattern`
    pub async fn delete_matching(&self, pattern: &str) -> bool {
        match self.backend.delete_matching(pattern).await {
            Ok(deleted) => {
                debug!(pattern, deleted, "Store keys deleted by pattern");
                true
            }
            Err(e) => {
                warn!(pattern, error = %e, "Store pattern delete failed");
                false
            }
        }
    }

    /// Backend-side bounded increment; `None` when the backend failed
    pub async fn increment_bounded(
        &self,
        key: &str,
        max: u64,
        ttl: Duration,
    ) -> Option<BoundedIncrement> {
        match self.backend.increment_bounded(key, max, ttl).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(key, error = %e, "Store increment failed");
                None
            }
        }
    }
}
