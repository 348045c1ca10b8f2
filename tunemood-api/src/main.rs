//! tunemood-api - Audio Mood Analysis service
//!
//! Serves the upload UI at `/` and the analysis endpoint at
//! `POST /api/analyze`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tunemood_api::config::{ConfigOverrides, ServiceConfig};
use tunemood_api::extractors::PlaceholderAnalyzer;
use tunemood_api::{build_router, AppState};
use tunemood_common::config::load_toml_config;

/// Command-line arguments for tunemood-api
#[derive(Parser, Debug)]
#[command(name = "tunemood-api")]
#[command(about = "Audio mood analysis HTTP service")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "TUNEMOOD_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TUNEMOOD_PORT")]
    port: Option<u16>,

    /// Directory for request-scoped upload files
    #[arg(long, env = "TUNEMOOD_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Maximum upload size in MiB
    #[arg(long, env = "TUNEMOOD_MAX_UPLOAD_MB")]
    max_upload_mb: Option<u64>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "TUNEMOOD_LOG_LEVEL")]
    log_level: Option<String>,

    /// TOML config file (default: <config dir>/tunemood/config.toml)
    #[arg(short, long, env = "TUNEMOOD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, config_source) = load_toml_config(args.config.as_deref())
        .context("Failed to load config file")?;
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            host: args.host,
            port: args.port,
            temp_dir: args.temp_dir,
            max_upload_mb: args.max_upload_mb,
            log_level: args.log_level,
        },
        toml_config,
    )
    .context("Invalid configuration")?;

    tunemood_common::logging::init_tracing(&config.log_level, &["tunemood_api", "tunemood_common"])
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    info!(
        "Starting tunemood-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration loaded from {}", config_source);

    config
        .ensure_temp_dir()
        .context("Failed to prepare temp directory")?;
    info!("Temp directory: {}", config.upload.temp_dir.display());
    info!("Upload limit: {} bytes", config.upload.max_upload_bytes);

    let extractor = Arc::new(PlaceholderAnalyzer::new());
    let state = AppState::new(extractor, config.upload.clone());
    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("tunemood-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
