//! Key/Value Backend Port
//!
//! Raw contract for the networked (or in-process) store that holds cache
//! entries and rate-limit counters. Implementations report every failure as
//! an [`Error`](crate::Error); the fail-open policy is applied one layer up
//! by `aside_application::KeyValueStore`, never by the backend itself.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a bounded increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedIncrement {
    /// Counter value after the operation (unchanged when not incremented)
    pub count: u64,
    /// False when the counter had already reached the maximum
    pub incremented: bool,
}

impl BoundedIncrement {
    /// Counter was below the maximum and has been bumped to `count`
    pub fn incremented(count: u64) -> Self {
        Self {
            count,
            incremented: true,
        }
    }

    /// Counter was already at or above the maximum
    pub fn saturated(count: u64) -> Self {
        Self {
            count,
            incremented: false,
        }
    }
}

/// Cache Entry Configuration
///
/// Per-write policy for cache entries. A missing TTL falls back to the
/// process-wide default supplied by the caller.
///
/// # Example
///
/// ```
/// use aside_domain::ports::CacheEntryConfig;
/// use std::time::Duration;
///
/// let config = CacheEntryConfig::new().with_ttl_secs(600);
/// assert_eq!(config.effective_ttl(Duration::from_secs(60)), Duration::from_secs(600));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live override for the entry
    pub ttl: Option<Duration>,
}

impl CacheEntryConfig {
    /// Create a config that uses the default TTL
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Some(Duration::from_secs(secs));
        self
    }

    /// Get the effective TTL, falling back to `default`
    pub fn effective_ttl(&self, default: Duration) -> Duration {
        self.ttl.unwrap_or(default)
    }
}

/// Key/Value Backend Port
///
/// # Implementations
///
/// - **Redis**: pooled connections, glob enumeration via `SCAN`
/// - **InMemory**: process-local map with per-entry expiry
/// - **Null**: stores nothing
#[async_trait]
pub trait KeyValueBackend: Send + Sync + std::fmt::Debug {
    /// Read a value; `Ok(None)` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite `key` with `value`, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Overwrite a live `key` with `value`, keeping whatever lifetime it has left
    ///
    /// Never creates the key: when it is absent or has expired nothing is
    /// written and `Ok(false)` is returned.
    async fn set_keep_ttl(&self, key: &str, value: &str) -> Result<bool>;

    /// Remove `key`; returns whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Remove every key matching the glob `pattern`; returns how many were removed
    async fn delete_matching(&self, pattern: &str) -> Result<u64>;

    /// Atomically increment the integer at `key` unless it already reached `max`
    ///
    /// The first increment of a key sets its expiry to `ttl`.
    async fn increment_bounded(&self, key: &str, max: u64, ttl: Duration)
    -> Result<BoundedIncrement>;

    /// Name of this backend implementation (e.g. "redis", "memory", "null")
    fn provider_name(&self) -> &str;
}
