//! Configuration types

pub mod app;
pub mod logging;
pub mod rate_limit;
pub mod store;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use rate_limit::RateLimitConfig;
pub use store::{StoreConfig, StoreProvider};
