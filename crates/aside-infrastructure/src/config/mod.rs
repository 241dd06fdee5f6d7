//! Configuration management
//!
//! Sources are layered with figment: built-in defaults, then a TOML file,
//! then `ASIDE__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, RateLimitConfig, StoreConfig, StoreProvider};
