//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Cache and rate-limit defaults are defined in `aside_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "aside.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "aside";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "ASIDE";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORE CONSTANTS
// ============================================================================

/// Default store URL
pub const DEFAULT_STORE_URL: &str = "redis://localhost:6379/0";

/// Default number of pooled store connections
pub const DEFAULT_STORE_POOL_SIZE: usize = 50;

/// Default deadline for a single store operation in milliseconds
pub const DEFAULT_STORE_OPERATION_TIMEOUT_MS: u64 = 2000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "ASIDE_LOG";
