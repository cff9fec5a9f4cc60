//! voices-web - student voices campaign server
//!
//! `serve` (default) runs the HTTP server. `list-submissions` dumps stored
//! submissions as JSON lines for the moderation workflow.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voices_common::config::TomlConfig;
use voices_common::store::{open_list_store, StoryStore};
use voices_web::{build_router, AppState};

/// Command-line arguments for voices-web
#[derive(Parser, Debug)]
#[command(name = "voices-web")]
#[command(about = "Student voices campaign site and story submission service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "VOICES_PORT")]
    port: Option<u16>,

    /// SQLite database path (overrides config file)
    #[arg(short, long, env = "VOICES_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print stored submissions as JSON lines, newest first
    ListSubmissions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.storage.database_path = Some(database);
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting voices-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let list = open_list_store(&config.storage)
        .await
        .context("Failed to open story store")?;
    info!("Story store: {} backend", list.backend_name());

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, AppState::new(list)).await,
        Command::ListSubmissions => list_submissions(StoryStore::new(list)).await,
    }
}

async fn serve(config: &TomlConfig, state: AppState) -> Result<()> {
    let ip = config
        .bind_address
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("voices-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn list_submissions(store: StoryStore) -> Result<()> {
    let readout = store
        .read_all()
        .await
        .context("Failed to read submissions")?;

    for record in &readout.stories {
        println!("{}", serde_json::to_string(record)?);
    }

    info!("Listed {} submissions", readout.stories.len());
    if readout.skipped > 0 {
        warn!("Skipped {} unreadable entries", readout.skipped);
    }
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
                warn!("Failed to install terminate handler: {}", e);
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
