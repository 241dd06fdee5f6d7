//! Domain Layer - aside
//!
//! Core types shared by every layer of the cache-aside and admission-control
//! stack. This crate has no knowledge of concrete backends or transports.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error type and `Result` alias |
//! | [`constants`] | Header names, key prefixes and configuration defaults |
//! | [`value_objects`] | Cache keys, rate decisions, inbound request attributes |
//! | [`ports`] | Contracts implemented by providers (`KeyValueBackend`, `Clock`) |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{BoundedIncrement, Clock, KeyValueBackend};
pub use value_objects::{CacheArgs, CacheKey, GateRequest, RateDecision, RateRejection};
