//! Page protocol demo server.
//!
//! ```text
//!   browser ──▶ request id ─▶ trace ─▶ timeout ─▶ protocol middleware ─▶ handler
//!                                                        │                  │
//!                                                        │             renderer
//!                                                        │          (JSON | HTML)
//!   browser ◀──────────────────────────────── version check, 302→303, tagging
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use inertia_server::config::{load_config, AppConfig};
use inertia_server::observability::{logging, metrics};
use inertia_server::HttpServer;

#[derive(Parser)]
#[command(name = "inertia-server")]
#[command(about = "Serve pages over the Inertia protocol", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "inertia-server starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        root_template = %config.inertia.root_template.display(),
        asset_version = %config.inertia.asset_version,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                // Keep the sender alive so the server is not shut down.
                std::future::pending::<()>().await;
            }
        }
    });

    HttpServer::new(config).run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
