//! Fixed-window request counter
//!
//! Every request landing in `[start, start + window)` shares the counter key
//! `ratelimit:{identifier}:{start}` with `start = floor(now / window) * window`.
//! The key is written with a TTL of one window on its first increment, so a
//! closed window's counter is never addressed again and expires on its own.

use crate::store::KeyValueStore;
use aside_domain::constants::RATE_LIMIT_KEY_PREFIX;
use aside_domain::ports::{BoundedIncrement, Clock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// How the counter is bumped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterMode {
    /// Read, compare, then write from the caller. Concurrent requests can
    /// all read a count below the limit and overshoot it.
    #[default]
    CheckThenIncrement,
    /// One backend-side increment-and-compare
    Atomic,
}

/// Counter state after one increment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Counter value after the attempt
    pub count: u64,
    /// False when the window was already full and nothing was written
    pub incremented: bool,
    /// Seconds until the current window closes
    pub reset_seconds: u64,
}

/// Fixed-window counter over the shared store
#[derive(Debug, Clone)]
pub struct WindowCounter {
    store: KeyValueStore,
    clock: Arc<dyn Clock>,
    max_requests: u64,
    mode: CounterMode,
}

impl WindowCounter {
    /// Counter allowing `max_requests` per window
    pub fn new(store: KeyValueStore, clock: Arc<dyn Clock>, max_requests: u64) -> Self {
        Self {
            store,
            clock,
            max_requests,
            mode: CounterMode::default(),
        }
    }

    /// Select the increment strategy
    #[must_use]
    pub fn with_mode(mut self, mode: CounterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configured maximum per window
    pub fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// Active increment strategy
    pub fn mode(&self) -> CounterMode {
        self.mode
    }

    /// Start of the window containing `now_secs`
    pub fn window_start(window_secs: u64, now_secs: u64) -> u64 {
        let window = window_secs.max(1);
        now_secs / window * window
    }

    /// Counter key for the window containing `now_secs`
    pub fn current_window_key(identifier: &str, window_secs: u64, now_secs: u64) -> String {
        format!(
            "{RATE_LIMIT_KEY_PREFIX}:{identifier}:{}",
            Self::window_start(window_secs, now_secs)
        )
    }

    /// Whole seconds from `now` until the window containing it closes
    pub fn reset_seconds(window_secs: u64, now: Duration) -> u64 {
        let window = window_secs.max(1);
        let end_ms = u128::from(Self::window_start(window, now.as_secs()) + window) * 1000;
        let remaining_secs = end_ms.saturating_sub(now.as_millis()) / 1000;
        u64::try_from(remaining_secs).unwrap_or(window)
    }

    /// Count one request for `identifier` unless its window is already full
    pub async fn increment(&self, identifier: &str, window_secs: u64) -> WindowCount {
        let now = self.clock.now();
        let key = Self::current_window_key(identifier, window_secs, now.as_secs());
        let ttl = Duration::from_secs(window_secs.max(1));

        let outcome = match self.mode {
            CounterMode::CheckThenIncrement => self.check_then_increment(&key, ttl).await,
            CounterMode::Atomic => self.atomic_increment(&key, ttl).await,
        };

        WindowCount {
            count: outcome.count,
            incremented: outcome.incremented,
            reset_seconds: Self::reset_seconds(window_secs, now),
        }
    }

    async fn check_then_increment(&self, key: &str, ttl: Duration) -> BoundedIncrement {
        let current = self.read_count(key).await;
        if current >= self.max_requests {
            return BoundedIncrement::saturated(current);
        }

        let next = current + 1;
        let value = next.to_string();
        if next == 1 {
            self.store.set(key, &value, ttl).await;
        } else {
            // Skipped when the window expired since the read
            self.store.set_keep_ttl(key, &value).await;
        }
        BoundedIncrement::incremented(next)
    }

    async fn atomic_increment(&self, key: &str, ttl: Duration) -> BoundedIncrement {
        // An unreachable backend reads as an empty window, same as the
        // check-then-increment path.
        self.store
            .increment_bounded(key, self.max_requests, ttl)
            .await
            .unwrap_or(BoundedIncrement::incremented(1))
    }

    async fn read_count(&self, key: &str) -> u64 {
        let Some(raw) = self.store.get(key).await else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "Unparseable rate-limit counter; treating as 0");
            0
        })
    }
}
