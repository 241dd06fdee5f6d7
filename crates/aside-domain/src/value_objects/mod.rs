//! Value objects

pub mod cache_key;
pub mod rate;
pub mod request;

pub use cache_key::{CacheArgs, CacheKey};
pub use rate::{RateDecision, RateRejection};
pub use request::GateRequest;
