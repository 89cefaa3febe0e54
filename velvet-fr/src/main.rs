//! velvet-fr (Fusion Resolver) - Main entry point
//!
//! Serves forward fusion, reverse lookup, the persona compendium and the
//! theurgy table over HTTP. Starts with zero configuration using the
//! embedded reference data.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use velvet_common::config::{load_toml_config, resolve_data_source, DataSource};
use velvet_common::VelvetData;
use velvet_fr::{build_router, logging, AppState};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5730;

/// Command-line arguments for velvet-fr
#[derive(Parser, Debug)]
#[command(name = "velvet-fr")]
#[command(about = "Fusion Resolver microservice for the Velvet Room guide")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "VELVET_FR_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides config file)
    #[arg(long, env = "VELVET_FR_HOST")]
    host: Option<String>,

    /// Reference data file to load instead of the embedded data
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Config file (default: platform config directory)
    #[arg(short, long, env = "VELVET_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its log level can seed the filter;
    // anything worth reporting about it is logged once the subscriber exists
    let loaded = load_toml_config(args.config.as_deref()).context("Failed to load config")?;
    let config = loaded.config;

    logging::init(&config.logging.level);

    // Log build identification immediately after tracing init
    info!(
        "Starting Velvet Fusion Resolver (velvet-fr) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some((path, e)) = &loaded.skipped {
        warn!("Ignoring config file {}: {}", path.display(), e);
    }
    match &loaded.path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults"),
    }

    let source = resolve_data_source(args.data_file.as_deref(), &config);
    let data = match &source {
        DataSource::Embedded => {
            info!("Using embedded reference data");
            VelvetData::embedded().context("Embedded reference data is invalid")?
        }
        DataSource::File(path) => {
            info!("Reference data file: {}", path.display());
            VelvetData::from_path(path)
                .with_context(|| format!("Failed to load reference data from {}", path.display()))?
        }
    };

    let unreachable = data.chart.unreachable();
    if !unreachable.is_empty() {
        let names: Vec<&str> = unreachable
            .iter()
            .map(|arcana| data.chart.catalog().name(*arcana))
            .collect();
        info!("Arcana without a standard fusion pair: {}", names.join(", "));
    }

    let host = args
        .host
        .or(config.server.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port.or(config.server.port).unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

    if !addr.ip().is_loopback() {
        warn!("Listening on non-loopback address {}", addr);
    }

    let app = build_router(AppState::new(data, source));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("velvet-fr listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
