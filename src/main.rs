//! Health Aggregator
//!
//! Serves one URL that reports the merged health of a fixed set of services.
//!
//! # Architecture Overview
//!
//! ```text
//!     Monitor / LB                 ┌──────────────────────────────────────────┐
//!     ─────── GET /health ────────▶│  http::server ─▶ health::Aggregator      │
//!                                  │                      │ join_all          │
//!                                  │        ┌─────────────┼─────────────┐     │
//!                                  │        ▼             ▼             ▼     │
//!                                  │     probe #1      probe #2  ...  probe #n├──▶ targets
//!                                  │        └─────────────┬─────────────┘     │   (GET, timeout)
//!                                  │                      ▼                   │
//!     ◀──── 200 | 503 + JSON ──────│             AggregatedHealth             │
//!                                  └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use health_aggregator::config::{self, AggregatorConfig};
use health_aggregator::observability::init_logging;
use health_aggregator::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "health-aggregator", version)]
#[command(about = "Aggregates the health of several services behind one endpoint", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, env = "HEALTH_AGGREGATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port, overriding both the file and `PORT`.
    #[arg(short, long)]
    port: Option<u16>,
}

fn load(cli: &Cli) -> Result<AggregatorConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::read_config(path)?,
        None => AggregatorConfig::default(),
    };

    config::apply_env(&mut config)?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    init_logging(&config.observability);

    tracing::info!("health-aggregator v{} starting", env!("CARGO_PKG_VERSION"));
    for target in &config.targets {
        tracing::info!(name = %target.name, url = %target.url, "Target configured");
    }

    let bind_address = config.listener.bind_address();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %bind_address, error = %e, "Failed to bind listener");
            return Err(e.into());
        }
    };

    tracing::info!(address = %listener.local_addr()?, "Health aggregator listening");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
