//! Key/value backend implementations
//!
//! ## Backend Selection Guide
//!
//! - **Testing / single instance**: `InMemoryBackend`
//! - **Multi instance**: `RedisBackend`
//! - **Caching and limiting disabled**: `NullBackend`

#[cfg(feature = "store-memory")]
pub mod memory;
pub mod null;
#[cfg(feature = "store-redis")]
pub mod redis;

#[cfg(feature = "store-memory")]
pub use memory::InMemoryBackend;
pub use null::NullBackend;
#[cfg(feature = "store-redis")]
pub use redis::RedisBackend;
