//! Provider implementations for aside
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`NullBackend`] | Disabled | Stores nothing; every read misses |
//! | [`InMemoryBackend`] | Local | Process-local map with per-entry expiry |
//! | [`RedisBackend`] | Distributed | Pooled Redis connections for multi-instance |
//!
//! ## Clocks
//!
//! [`SystemClock`] reads the wall clock; [`ManualClock`] is set by hand for
//! deterministic window arithmetic in tests.

pub mod backend;
pub mod clock;

#[cfg(feature = "store-memory")]
pub use backend::InMemoryBackend;
pub use backend::NullBackend;
#[cfg(feature = "store-redis")]
pub use backend::RedisBackend;
pub use clock::{ManualClock, SystemClock};
