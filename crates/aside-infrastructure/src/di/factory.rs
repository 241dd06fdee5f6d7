//! Backend factory
//!
//! Maps `store.provider` to a concrete backend.

use crate::config::{StoreConfig, StoreProvider};
use aside_domain::error::Result;
use aside_domain::ports::{Clock, KeyValueBackend};
use aside_providers::{InMemoryBackend, NullBackend, RedisBackend};
use std::sync::Arc;
use tracing::info;

/// Create the backend selected by `config`
///
/// `clock` drives entry expiry for the in-memory backend; Redis keeps its own
/// time.
pub fn create_backend(
    config: &StoreConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn KeyValueBackend>> {
    let backend: Arc<dyn KeyValueBackend> = match config.provider {
        StoreProvider::Redis => Arc::new(RedisBackend::new(
            &config.url,
            config.pool_size,
            config.operation_timeout(),
        )?),
        StoreProvider::Memory => Arc::new(InMemoryBackend::with_clock(clock)),
        StoreProvider::Null => Arc::new(NullBackend::new()),
    };

    info!(
        provider = config.provider.as_str(),
        pool_size = config.pool_size,
        "Store backend created"
    );
    Ok(backend)
}
