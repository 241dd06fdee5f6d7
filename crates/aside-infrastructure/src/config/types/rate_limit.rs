//! Rate limit configuration types

use aside_application::{CounterMode, RateLimitPolicy};
use aside_domain::constants::{DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS};
use serde::{Deserialize, Serialize};

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable admission control
    pub enabled: bool,

    /// Requests admitted per client and path in one window
    pub max_requests: u64,

    /// Window length in seconds
    pub window_secs: u64,

    /// Credential that skips counting when sent in `X-RateLimit-Bypass`
    pub bypass_token: Option<String>,

    /// Path prefixes that are never counted
    pub excluded_path_prefixes: Vec<String>,

    /// Count with a single atomic backend operation instead of read-then-write
    pub atomic_increment: bool,
}

impl RateLimitConfig {
    /// Gatekeeper policy described by this section
    pub fn policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            enabled: self.enabled,
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            bypass_token: self.bypass_token.clone().filter(|token| !token.is_empty()),
            excluded_path_prefixes: self.excluded_path_prefixes.clone(),
            counter_mode: if self.atomic_increment {
                CounterMode::Atomic
            } else {
                CounterMode::CheckThenIncrement
            },
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            bypass_token: None,
            excluded_path_prefixes: Vec::new(),
            atomic_increment: false,
        }
    }
}
