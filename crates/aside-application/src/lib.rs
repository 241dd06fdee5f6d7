//! Application Layer - aside
//!
//! Orchestrates the cache-aside and admission-control flows on top of the
//! domain ports. Nothing here owns state beyond configuration; every entry
//! and counter lives in the backend behind [`KeyValueStore`].
//!
//! ## Use Cases
//!
//! - [`CacheAside`]: get, compute on miss, write back
//! - [`InvalidationRouter`]: drop one key or sweep a prefix
//! - [`WindowCounter`]: fixed-window request counting
//! - [`RateGatekeeper`]: admit or reject inbound requests
//!
//! ## Failure policy
//!
//! Backend failures never reach callers of this crate. [`KeyValueStore`]
//! logs them and degrades to "absent" or `false`; compute-function errors
//! pass through [`CacheAside`] untouched.

pub mod store;
pub mod use_cases;

pub use store::KeyValueStore;
pub use use_cases::*;
