//! Hit counter service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http server ──▶ /healthz ──▶ pool health   │
//!                           │        │                                     │
//!                           │        └──────▶ /  ──▶ admission permit      │
//!                           │                          │                   │
//!                           │                          ▼                   │
//!     Client Response       │                    store INCR "hits" ────────┼──▶ Redis
//!     ◀─────────────────────┼──────────────────── greeting / 503 / 500     │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use hit_counter::config::{self, CONFIG_PATH_ENV};
use hit_counter::lifecycle;
use hit_counter::observability::logging;

#[derive(Parser)]
#[command(name = "hit-counter")]
#[command(about = "Redis-backed hit counter with in-process admission control", long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = config::resolve_config(config_path.as_deref(), cli.port)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?config_path,
        bind_address = %config.listener.bind_address(),
        pool_capacity = config.pool.capacity,
        soft_limit_fraction = config.pool.soft_limit_fraction,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::launch(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
