//! Ports implemented by provider crates

pub mod backend;
pub mod clock;

pub use backend::{BoundedIncrement, CacheEntryConfig, KeyValueBackend};
pub use clock::Clock;
