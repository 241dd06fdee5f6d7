//! Store configuration types

use crate::constants::{
    DEFAULT_STORE_OPERATION_TIMEOUT_MS, DEFAULT_STORE_POOL_SIZE, DEFAULT_STORE_URL,
};
use aside_domain::constants::DEFAULT_CACHE_TTL_SECS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Store backends
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Shared store (Redis)
    #[default]
    Redis,
    /// Process-local store
    Memory,
    /// Stores nothing
    Null,
}

impl StoreProvider {
    /// Configuration name of the provider
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Memory => "memory",
            Self::Null => "null",
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store provider
    pub provider: StoreProvider,

    /// Connection URL (for the Redis provider)
    pub url: String,

    /// Upper bound on pooled connections
    pub pool_size: usize,

    /// Deadline for a single operation in milliseconds
    pub operation_timeout_ms: u64,

    /// TTL applied to cache entries without an override, in seconds
    pub default_ttl_secs: u64,
}

impl StoreConfig {
    /// Operation deadline
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Default cache entry TTL
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::default(),
            url: DEFAULT_STORE_URL.to_string(),
            pool_size: DEFAULT_STORE_POOL_SIZE,
            operation_timeout_ms: DEFAULT_STORE_OPERATION_TIMEOUT_MS,
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}
