//! Domain constants
//!
//! Values shared by the cache and rate-limit layers. Infrastructure-only
//! constants (config file names, env prefixes) live in `aside-infrastructure`.

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Separator between cache key segments
pub const KEY_SEPARATOR: &str = ":";

/// Default TTL for cache entries in seconds (1 hour)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

// ============================================================================
// RATE LIMIT CONSTANTS
// ============================================================================

/// Namespace prepended to every rate-limit counter key
pub const RATE_LIMIT_KEY_PREFIX: &str = "ratelimit";

/// Default maximum requests per window
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u64 = 100;

/// Default window length in seconds
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Identifier used when the request carries no network origin
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Human-readable reason attached to rejections
pub const RATE_LIMIT_EXCEEDED_DETAIL: &str = "Rate limit exceeded";

/// Status code reported for rejected requests
pub const RATE_LIMIT_STATUS_CODE: u16 = 429;

// ============================================================================
// HEADER NAMES
// ============================================================================

/// Response header carrying the window limit
pub const HEADER_RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";

/// Response header carrying the remaining quota
pub const HEADER_RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";

/// Response header carrying seconds until the window resets
pub const HEADER_RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";

/// Request header carrying the bypass credential
pub const HEADER_RATE_LIMIT_BYPASS: &str = "X-RateLimit-Bypass";

/// Request header carrying the proxied client origin
pub const HEADER_FORWARDED_FOR: &str = "X-Forwarded-For";
