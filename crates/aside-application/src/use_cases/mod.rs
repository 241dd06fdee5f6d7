//! Use case implementations

pub mod cache_aside;
pub mod gatekeeper;
pub mod invalidation;
pub mod window_counter;

pub use cache_aside::{CacheAside, Cached, CachedOperation};
pub use gatekeeper::{Admission, RateGatekeeper, RateLimitPolicy};
pub use invalidation::InvalidationRouter;
pub use window_counter::{CounterMode, WindowCount, WindowCounter};
