//! Cache-Aside Use Case
//!
//! Look a deterministic key up in the store; on a miss run the caller's
//! compute function, return its result and write it back. Concurrent misses
//! on one key each compute and each write (last writer wins).

use crate::store::KeyValueStore;
use aside_domain::ports::CacheEntryConfig;
use aside_domain::{CacheArgs, CacheKey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of a cache-aside call
#[derive(Debug, Clone, PartialEq)]
pub enum Cached<T> {
    /// Served from the store and decoded
    Hit(T),
    /// Served from the store but not decodable as `T`; the payload verbatim
    Raw(String),
    /// Miss; produced by the compute function
    Computed(T),
}

impl<T> Cached<T> {
    /// The typed value, if there is one
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Hit(value) | Self::Computed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// True when the store answered without running the compute function
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_) | Self::Raw(_))
    }
}

/// Cache-aside orchestrator
#[derive(Debug, Clone)]
pub struct CacheAside {
    store: KeyValueStore,
    default_ttl: Duration,
}

impl CacheAside {
    /// Create the orchestrator; `default_ttl` applies when a call has no override
    pub fn new(store: KeyValueStore, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    /// TTL used when a call does not override it
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The store this orchestrator reads and writes
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Bind a prefix (and optionally a TTL) for repeated calls
    pub fn operation(&self, prefix: impl Into<String>) -> CachedOperation {
        CachedOperation {
            cache: self.clone(),
            prefix: prefix.into(),
            config: CacheEntryConfig::default(),
        }
    }

    /// Cache-aside with the default TTL
    pub async fn execute<T, E, F, Fut>(
        &self,
        prefix: &str,
        args: &CacheArgs,
        compute: F,
    ) -> Result<Cached<T>, E>
    where
        T: Serialize + DeserializeOwned + fmt::Debug,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute_with(prefix, args, CacheEntryConfig::default(), compute)
            .await
    }

    /// Cache-aside with an explicit entry config
    pub async fn execute_with<T, E, F, Fut>(
        &self,
        prefix: &str,
        args: &CacheArgs,
        config: CacheEntryConfig,
        compute: F,
    ) -> Result<Cached<T>, E>
    where
        T: Serialize + DeserializeOwned + fmt::Debug,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = CacheKey::new(prefix, args);

        if let Some(payload) = self.store.get(key.as_str()).await {
            return Ok(match serde_json::from_str::<T>(&payload) {
                Ok(value) => {
                    debug!(key = %key, "Cache hit");
                    Cached::Hit(value)
                }
                Err(e) => {
                    debug!(key = %key, error = %e, "Cached payload not decodable; returning raw");
                    Cached::Raw(payload)
                }
            });
        }

        debug!(key = %key, "Cache miss");
        let value = compute().await?;

        let payload = match serde_json::to_string(&value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "Value not serializable; caching its debug form");
                format!("{value:?}")
            }
        };
        self.store
            .set(key.as_str(), &payload, config.effective_ttl(self.default_ttl))
            .await;

        Ok(Cached::Computed(value))
    }

    /// Dynamic form: a raw payload comes back as a JSON string value
    pub async fn execute_json<E, F, Fut>(
        &self,
        prefix: &str,
        args: &CacheArgs,
        compute: F,
    ) -> Result<serde_json::Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<serde_json::Value, E>>,
    {
        Ok(match self.execute(prefix, args, compute).await? {
            Cached::Hit(value) | Cached::Computed(value) => value,
            Cached::Raw(payload) => serde_json::Value::String(payload),
        })
    }
}

/// A cache-aside call site with a fixed prefix and TTL policy
///
/// # Example
///
/// ```ignore
/// let detail = cache.operation("products:detail").with_ttl_secs(300);
/// let product = detail
///     .run(&CacheArgs::new().arg(id), || repository.find(id))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct CachedOperation {
    cache: CacheAside,
    prefix: String,
    config: CacheEntryConfig,
}

impl CachedOperation {
    /// Override the TTL for entries written by this operation
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.config = self.config.with_ttl(ttl);
        self
    }

    /// Override the TTL in seconds
    #[must_use]
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.config = self.config.with_ttl_secs(secs);
        self
    }

    /// Key prefix of this operation
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run the operation for one set of arguments
    pub async fn run<T, E, F, Fut>(&self, args: &CacheArgs, compute: F) -> Result<Cached<T>, E>
    where
        T: Serialize + DeserializeOwned + fmt::Debug,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cache
            .execute_with(&self.prefix, args, self.config, compute)
            .await
    }
}
