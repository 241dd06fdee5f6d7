//! Test fixtures

use aside_infrastructure::config::{AppConfig, RateLimitConfig, StoreProvider};
use aside_infrastructure::di::init_app_with_clock;
use aside_infrastructure::AppContext;
use aside_providers::ManualClock;
use std::sync::Arc;

/// Header carrying the client origin in tests
pub const FORWARDED_FOR: &str = "X-Forwarded-For";

/// Context over the in-memory store with the clock at t=125s
pub fn context(rate_limit: RateLimitConfig) -> AppContext {
    let mut config = AppConfig::default();
    config.store.provider = StoreProvider::Memory;
    config.rate_limit = rate_limit;
    init_app_with_clock(config, Arc::new(ManualClock::at_secs(125))).unwrap()
}

/// Rate limit section admitting `max_requests` per 60s window
pub fn limit(max_requests: u64) -> RateLimitConfig {
    RateLimitConfig {
        max_requests,
        ..RateLimitConfig::default()
    }
}
