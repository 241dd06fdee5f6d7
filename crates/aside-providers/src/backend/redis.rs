//! Redis distributed backend
//!
//! Shared store for multi-instance deployments. Counters and cached values
//! live in Redis, so every process behind a load balancer sees the same
//! rate-limit windows.
//!
//! ## Features
//!
//! - Bounded pool of `pool_size` connection slots, each established lazily
//!   on first use and reconnected automatically by [`ConnectionManager`]
//! - Per-operation deadline; an expired deadline is reported as
//!   [`Error::Timeout`]
//! - Pattern deletion via an incremental `SCAN` cursor, never `KEYS`
//! - Bounded increment as a single server-side script
//!
//! ## Example
//!
//! ```ignore
//! use aside_providers::RedisBackend;
//! use std::time::Duration;
//!
//! let backend = RedisBackend::new("redis://localhost:6379/0", 50, Duration::from_secs(2))?;
//! ```

use async_trait::async_trait;
use aside_domain::error::{Error, Result};
use aside_domain::ports::{BoundedIncrement, KeyValueBackend};
use redis::aio::ConnectionManager;
use redis::{Client, RedisResult, Script};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Keys requested per `SCAN` round trip
const SCAN_BATCH: usize = 500;

/// Increment `KEYS[1]` unless it already holds `ARGV[1]`; arm the expiry
/// (`ARGV[2]` milliseconds) only when the key is created.
const INCREMENT_BOUNDED_SCRIPT: &str = r"
local current = tonumber(redis.call('GET', KEYS[1]) or '0')
if current >= tonumber(ARGV[1]) then
    return {current, 0}
end
local next = redis.call('INCR', KEYS[1])
if next == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[2])
end
return {next, 1}
";

/// Redis key/value backend
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    slots: Arc<[OnceCell<ConnectionManager>]>,
    next_slot: Arc<AtomicUsize>,
    operation_timeout: Duration,
    increment_script: Arc<Script>,
}

impl RedisBackend {
    /// Create a backend for `url`
    ///
    /// Only parses the URL; no connection is opened until the first
    /// operation, so an unreachable server does not prevent startup.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379/0")
    /// * `pool_size` - Upper bound on concurrently open connections
    /// * `operation_timeout` - Deadline for each operation, connect included
    pub fn new(url: &str, pool_size: usize, operation_timeout: Duration) -> Result<Self> {
        if pool_size == 0 {
            return Err(Error::invalid_argument("Redis pool size must be positive"));
        }
        let client = Client::open(url).map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        let slots: Vec<OnceCell<ConnectionManager>> =
            (0..pool_size).map(|_| OnceCell::new()).collect();

        Ok(Self {
            client,
            slots: slots.into(),
            next_slot: Arc::new(AtomicUsize::new(0)),
            operation_timeout,
            increment_script: Arc::new(Script::new(INCREMENT_BOUNDED_SCRIPT)),
        })
    }

    /// Number of connection slots
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    /// Pick the next slot round-robin, connecting it if needed
    async fn connection(&self) -> Result<ConnectionManager> {
        let index = self.next_slot.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        let manager = self.slots[index]
            .get_or_try_init(|| async {
                debug!(slot = index, "Opening Redis connection");
                ConnectionManager::new(self.client.clone()).await
            })
            .await
            .map_err(|e| {
                Error::infrastructure_with_source(format!("Failed to get Redis connection: {e}"), e)
            })?;
        Ok(manager.clone())
    }

    /// Run `op` on a pooled connection under the operation deadline
    async fn run<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T>
    where
        F: FnOnce(ConnectionManager) -> Fut + Send,
        Fut: Future<Output = RedisResult<T>> + Send,
        T: Send,
    {
        let attempt = async {
            let conn = self.connection().await?;
            op(conn).await.map_err(|e| {
                Error::infrastructure_with_source(format!("Redis {operation} failed: {e}"), e)
            })
        };

        tokio::time::timeout(self.operation_timeout, attempt)
            .await
            .map_err(|_| Error::timeout(format!("redis {operation}"), self.operation_timeout))?
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("pool_size", &self.slots.len())
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl KeyValueBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.run("GET", |mut conn| async move {
            let value: RedisResult<Option<String>> =
                redis::cmd("GET").arg(key).query_async(&mut conn).await;
            value
        })
        .await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let millis = ttl_millis(ttl);
        self.run("SET", |mut conn| async move {
            let result: RedisResult<()> = redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("PX")
                .arg(millis)
                .query_async(&mut conn)
                .await;
            result
        })
        .await
    }

    async fn set_keep_ttl(&self, key: &str, value: &str) -> Result<bool> {
        // XX: a key that expired since it was read must not come back without a TTL
        self.run("SET XX KEEPTTL", |mut conn| async move {
            let reply: RedisResult<Option<String>> = redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("XX")
                .arg("KEEPTTL")
                .query_async(&mut conn)
                .await;
            reply.map(|ok| ok.is_some())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.run("DEL", |mut conn| async move {
            let deleted: RedisResult<u64> =
                redis::cmd("DEL").arg(key).query_async(&mut conn).await;
            deleted.map(|n| n > 0)
        })
        .await
    }

    async fn delete_matching(&self, pattern: &str) -> Result<u64> {
        self.run("SCAN/DEL", |mut conn| async move {
            let mut cursor: u64 = 0;
            let mut keys: Vec<String> = Vec::new();
            loop {
                let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query_async(&mut conn)
                    .await?;
                keys.extend(batch);
                if next == 0 {
                    break;
                }
                cursor = next;
            }

            if keys.is_empty() {
                return Ok(0);
            }
            // SCAN may report a key more than once
            keys.sort_unstable();
            keys.dedup();

            let deleted: u64 = redis::cmd("DEL")
                .arg(keys.as_slice())
                .query_async(&mut conn)
                .await?;
            Ok(deleted)
        })
        .await
    }

    async fn increment_bounded(
        &self,
        key: &str,
        max: u64,
        ttl: Duration,
    ) -> Result<BoundedIncrement> {
        let millis = ttl_millis(ttl);
        let script = Arc::clone(&self.increment_script);
        self.run("increment script", |mut conn| async move {
            let reply: RedisResult<(u64, u8)> = script
                .key(key)
                .arg(max)
                .arg(millis)
                .invoke_async(&mut conn)
                .await;
            reply.map(|(count, incremented)| {
                if incremented == 1 {
                    BoundedIncrement::incremented(count)
                } else {
                    BoundedIncrement::saturated(count)
                }
            })
        })
        .await
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}
