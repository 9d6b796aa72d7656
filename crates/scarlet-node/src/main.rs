//! Scarlet Node - guest list service.

use anyhow::Context;
use clap::Parser;
use scarlet_node::{
    api::{create_router, AppState},
    config::NodeConfig,
    health::HealthState,
    observability::{init_logging, LogFormat},
};
use scarlet_storage::GuestStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Scarlet Node - file-backed guest list service
#[derive(Parser, Debug)]
#[command(name = "scarlet-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API listen address
    #[arg(long)]
    api_addr: Option<SocketAddr>,

    /// Guest list JSON file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<NodeConfig> {
        let mut config =
            NodeConfig::load(self.config.as_deref()).context("loading configuration")?;
        if let Some(addr) = self.api_addr {
            config.api_addr = addr;
        }
        if let Some(path) = self.data_file {
            config.data_file = path;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;

    init_logging(&config.log_level, config.log_format() == LogFormat::Json);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Scarlet node");
    tracing::info!(
        api_addr = %config.api_addr,
        data_file = %config.data_file.display(),
        "Node configuration"
    );

    let guests = Arc::new(
        GuestStore::open(&config.data_file)
            .await
            .with_context(|| format!("opening guest list at {}", config.data_file.display()))?,
    );
    let health = HealthState::new(guests.clone());
    let app = create_router(AppState {
        guests,
        health: health.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.api_addr)
        .await
        .with_context(|| format!("binding {}", config.api_addr))?;

    health.set_ready(true);
    tracing::info!("Node is ready. Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("Scarlet node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
