//! Composition root
//!
//! Builds the configured backend and wires the application services on top
//! of it.

pub mod bootstrap;
pub mod factory;

pub use bootstrap::{AppContext, init_app, init_app_with_clock};
pub use factory::create_backend;
