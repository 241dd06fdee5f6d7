//! Main application configuration

use super::{LoggingConfig, RateLimitConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key/value store backing the cache and the rate-limit counters
    pub store: StoreConfig,

    /// Admission control
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}
