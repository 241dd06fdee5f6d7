//! In-memory backend
//!
//! Process-local store backed by a concurrent map. Entries carry their own
//! expiry instant read from an injectable [`Clock`], so TTL behaviour can be
//! driven deterministically. Expired entries are dropped lazily on access.
//!
//! Suitable for tests and single-instance deployments; counters are not shared
//! across processes.

use async_trait::async_trait;
use aside_domain::error::{Error, Result};
use aside_domain::ports::{BoundedIncrement, Clock, KeyValueBackend};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use globset::GlobBuilder;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::SystemClock;

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Option<Duration>,
}

impl StoredValue {
    fn expiring(value: String, now: Duration, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Some(now.saturating_add(ttl)),
        }
    }

    fn is_live(&self, now: Duration) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Process-local key/value backend
///
/// # Example
///
/// ```rust
/// use aside_providers::InMemoryBackend;
///
/// let backend = InMemoryBackend::new();
/// assert!(backend.is_empty());
/// ```
#[derive(Clone)]
pub struct InMemoryBackend {
    entries: Arc<DashMap<String, StoredValue>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryBackend {
    /// Create a backend reading the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a backend reading expiry from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Number of unexpired entries
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries.iter().filter(|e| e.is_live(now)).count()
    }

    /// Whether no unexpired entry remains
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining lifetime of `key`
    ///
    /// `None` when the key is absent or expired, `Some(None)` when it has no
    /// expiry.
    pub fn ttl(&self, key: &str) -> Option<Option<Duration>> {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;
        if !entry.is_live(now) {
            return None;
        }
        Some(entry.expires_at.map(|at| at.saturating_sub(now)))
    }

    fn purge_if_expired(&self, key: &str, now: Duration) {
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
    }
}

/// Rewrite a Redis `MATCH` pattern into globset syntax
///
/// Redis knows `*`, `?`, `[...]`, `[^...]` and `\` escapes only, so braces
/// and commas are literal there and get escaped here. A leading `^` in a
/// class becomes globset's `!`.
fn redis_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('!');
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '{' | '}' | ',' if !in_class => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[async_trait]
impl KeyValueBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now();
        let found = self
            .entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()));

        match found {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => {
                self.purge_if_expired(key, now);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = self.clock.now();
        self.entries.insert(
            key.to_string(),
            StoredValue::expiring(value.to_string(), now, ttl),
        );
        Ok(())
    }

    async fn set_keep_ttl(&self, key: &str, value: &str) -> Result<bool> {
        let now = self.clock.now();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) if occupied.get().is_live(now) => {
                occupied.get_mut().value = value.to_string();
                Ok(true)
            }
            Entry::Occupied(occupied) => {
                occupied.remove();
                Ok(false)
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let now = self.clock.now();
        Ok(self
            .entries
            .remove(key)
            .is_some_and(|(_, entry)| entry.is_live(now)))
    }

    async fn delete_matching(&self, pattern: &str) -> Result<u64> {
        let matcher = GlobBuilder::new(&redis_glob(pattern))
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| {
                Error::invalid_argument(format!("Invalid key pattern '{pattern}': {e}"))
            })?
            .compile_matcher();

        let now = self.clock.now();
        let matched: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| matcher.is_match(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();

        let mut deleted = 0;
        for key in matched {
            if self
                .entries
                .remove(&key)
                .is_some_and(|(_, entry)| entry.is_live(now))
            {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn increment_bounded(
        &self,
        key: &str,
        max: u64,
        ttl: Duration,
    ) -> Result<BoundedIncrement> {
        let now = self.clock.now();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) if occupied.get().is_live(now) => {
                let current: u64 = occupied.get().value.trim().parse().map_err(|_| {
                    Error::invalid_argument(format!("Value at '{key}' is not an integer"))
                })?;
                if current >= max {
                    return Ok(BoundedIncrement::saturated(current));
                }
                let next = current + 1;
                occupied.get_mut().value = next.to_string();
                Ok(BoundedIncrement::incremented(next))
            }
            Entry::Occupied(mut occupied) => {
                if max == 0 {
                    occupied.remove();
                    return Ok(BoundedIncrement::saturated(0));
                }
                occupied.insert(StoredValue::expiring("1".to_string(), now, ttl));
                Ok(BoundedIncrement::incremented(1))
            }
            Entry::Vacant(vacant) => {
                if max == 0 {
                    return Ok(BoundedIncrement::saturated(0));
                }
                vacant.insert(StoredValue::expiring("1".to_string(), now, ttl));
                Ok(BoundedIncrement::incremented(1))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
