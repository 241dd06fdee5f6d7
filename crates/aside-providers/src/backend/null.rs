//! Null backend
//!
//! Accepts every write and remembers nothing. With this backend every cache
//! lookup misses and every rate-limit window looks empty.

use async_trait::async_trait;
use aside_domain::error::Result;
use aside_domain::ports::{BoundedIncrement, KeyValueBackend};
use std::time::Duration;

/// Backend that doesn't store anything
///
/// # Example
///
/// ```rust
/// use aside_providers::NullBackend;
///
/// let backend = NullBackend::new();
/// // All operations succeed but nothing is stored
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueBackend for NullBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn set_keep_ttl(&self, _key: &str, _value: &str) -> Result<bool> {
        Ok(false)
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn delete_matching(&self, _pattern: &str) -> Result<u64> {
        Ok(0)
    }

    async fn increment_bounded(
        &self,
        _key: &str,
        max: u64,
        _ttl: Duration,
    ) -> Result<BoundedIncrement> {
        // Nothing is remembered, so every window starts empty.
        Ok(if max == 0 {
            BoundedIncrement::saturated(0)
        } else {
            BoundedIncrement::incremented(1)
        })
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
