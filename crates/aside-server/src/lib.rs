//! # Server Layer
//!
//! Rocket transport for aside: the admission-control guard, header fairing
//! and rejection catcher, plus a small smoke surface.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`rate_limit`] | `RateLimited` guard, `RateLimitHeaders` fairing, 429 catcher |
//! | [`routes`] | `/health` and `/status` |

pub mod rate_limit;
pub mod routes;

pub use rate_limit::{RateLimitHeaders, RateLimited, too_many_requests, with_rate_limiting};

use aside_infrastructure::config::ConfigLoader;
use aside_infrastructure::logging::init_logging;
use aside_infrastructure::{AppContext, init_app};
use rocket::{Build, Rocket};
use std::path::Path;
use tracing::info;

/// Rocket instance serving `context`
pub fn build_rocket(context: AppContext) -> Rocket<Build> {
    let gatekeeper = context.gatekeeper();
    let rocket = rocket::build().mount("/", routes::all()).manage(context);
    with_rate_limiting(rocket, gatekeeper)
}

/// Load configuration, initialise logging and serve until shutdown
pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    init_logging(&config.logging)?;
    let context = init_app(config)?;

    info!(store = context.store().provider_name(), "Starting aside server");
    let _ = build_rocket(context).launch().await?;
    Ok(())
}
