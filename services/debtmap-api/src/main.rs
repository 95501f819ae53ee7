//! Debt map API server
//!
//! Proxies the DataMapper indicator endpoints and serves the merged
//! dashboard dataset.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use debtmap_api::config::ServiceConfig;
use debtmap_api::source::HttpIndicatorSource;
use debtmap_api::state::AppState;
use debtmap_api::{build_router, metrics};

/// Debt map API server
#[derive(Parser, Debug)]
#[command(name = "debtmap-api")]
#[command(about = "Proxy and dashboard API for government debt statistics")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3001", env = "DEBTMAP_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Configuration file (YAML)
    #[arg(long, default_value = "config/debtmap.yaml", env = "DEBTMAP_CONFIG")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting debt map API server");

    let mut config = ServiceConfig::load(&args.config)?;
    config.apply_env_overrides();
    config.validate().context("Invalid configuration")?;

    let prometheus_handle = metrics::install_recorder()?;
    info!("Prometheus metrics exporter initialized");

    let source = Arc::new(HttpIndicatorSource::new(&config.upstream)?);
    for indicator in debtmap_common::Indicator::ALL {
        info!(
            indicator = %indicator,
            route = indicator.route(),
            url = source.url(indicator).unwrap_or_default(),
            "Proxy route configured"
        );
    }
    match source.map_url() {
        Some(url) => info!(route = "/api/maps", url = url, "Map route configured"),
        None => warn!("No map URL configured, /api/maps will answer 500"),
    }

    let state = Arc::new(AppState::new(source, config).with_metrics(prometheus_handle));
    let app = build_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Debt map API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
        })
        .await
        .context("Server failed")?;

    Ok(())
}
