//! aside server
//!
//! Serves the cache-aside and admission-control stack behind Rocket.
//! Configuration comes from `aside.toml` and `ASIDE__` environment variables;
//! listen address and port use Rocket's own `ROCKET_` settings.

use clap::Parser;

/// Command line interface for aside
#[derive(Parser, Debug)]
#[command(name = "aside")]
#[command(about = "Cache-aside and fixed-window rate limiting server")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    aside_server::run(cli.config.as_deref()).await
}
