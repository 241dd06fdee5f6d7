//! Application context
//!
//! ```text
//! AppConfig → create_backend → KeyValueStore → CacheAside
//!                                            → InvalidationRouter
//!                                            → RateGatekeeper
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(AppConfig::default())?;
//!
//! let products = context.cache().operation("products:detail");
//! let gatekeeper = context.gatekeeper();
//! ```

use crate::config::AppConfig;
use crate::di::factory::create_backend;
use aside_application::{CacheAside, InvalidationRouter, KeyValueStore, RateGatekeeper};
use aside_domain::error::Result;
use aside_domain::ports::Clock;
use aside_providers::SystemClock;
use std::sync::Arc;
use tracing::info;

/// Services sharing one backend
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<AppConfig>,
    store: KeyValueStore,
    cache: CacheAside,
    invalidation: InvalidationRouter,
    gatekeeper: Arc<RateGatekeeper>,
}

impl AppContext {
    /// Loaded configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fail-open store
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Cache-aside executor
    pub fn cache(&self) -> &CacheAside {
        &self.cache
    }

    /// Cache invalidation
    pub fn invalidation(&self) -> &InvalidationRouter {
        &self.invalidation
    }

    /// Shared admission control
    pub fn gatekeeper(&self) -> Arc<RateGatekeeper> {
        Arc::clone(&self.gatekeeper)
    }
}

/// Build the context reading the wall clock
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    init_app_with_clock(config, Arc::new(SystemClock))
}

/// Build the context with an explicit clock
pub fn init_app_with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<AppContext> {
    let backend = create_backend(&config.store, Arc::clone(&clock))?;
    let store = KeyValueStore::from_arc(backend);

    let cache = CacheAside::new(store.clone(), config.store.default_ttl());
    let invalidation = InvalidationRouter::new(store.clone());
    let gatekeeper = RateGatekeeper::new(store.clone(), clock, config.rate_limit.policy());

    info!(
        provider = store.provider_name(),
        rate_limit_enabled = config.rate_limit.enabled,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        "Application context initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        store,
        cache,
        invalidation,
        gatekeeper: Arc::new(gatekeeper),
    })
}
