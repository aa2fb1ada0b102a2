//! sync-relay binary entry point.
//!
//! Usage:
//! ```bash
//! sync-relay --config relay.toml
//! sync-relay --bind 127.0.0.1:8787 --database :memory:
//! sync-relay --help
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use codesync_relay::cleanup::spawn_cleanup_task;
use codesync_relay::config::Config;
use codesync_relay::http::build_router;
use codesync_relay::storage::{RecordStore, SqliteStorage};
use codesync_relay::SyncRelay;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;

const DEFAULT_CONFIG_PATH: &str = "relay.toml";

/// Share-code relay server for code-sync.
#[derive(Parser, Debug)]
#[command(name = "sync-relay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults apply when relay.toml is absent)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the HTTP bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the SQLite database path (`:memory:` for no persistence)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sync_relay=info,codesync_relay=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.http.bind_address = bind;
    }
    if let Some(database) = cli.database {
        config.storage.database = database;
    }

    tracing::info!("Starting sync-relay v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn RecordStore> = if config.storage.is_in_memory() {
        tracing::warn!("Using in-memory database; records are lost on shutdown");
        Arc::new(SqliteStorage::in_memory().await?)
    } else {
        let storage = SqliteStorage::new(&config.storage.database)
            .await
            .with_context(|| {
                format!("Failed to open database {}", config.storage.database.display())
            })?;
        tracing::info!("Database opened at {}", config.storage.database.display());
        Arc::new(storage)
    };

    let cleanup = spawn_cleanup_task(store.clone(), config.cleanup.clone());

    let bind_address = config.http.bind_address.clone();
    let relay = Arc::new(SyncRelay::new(config, store));
    let app = build_router(relay);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("sync-relay listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    cleanup.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Explicit paths must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                Ok(Config::from_file(default_path)?)
            } else {
                tracing::info!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                Ok(Config::default())
            }
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
