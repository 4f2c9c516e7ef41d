//! hostgend — the hostname portal daemon.
//!
//! Opens the hostname store and serves the portal REST API over it,
//! including hostname allocation.
//!
//! # Usage
//!
//! ```text
//! hostgend serve --port 3001 --data-dir /var/lib/hostgen
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hostgen_alloc::AllocatorConfig;
use hostgen_core::HostgenConfig;
use tracing::info;

/// Used when neither the command line nor the config file names one.
const DEFAULT_DATA_DIR: &str = "/var/lib/hostgen";

#[derive(Parser)]
#[command(name = "hostgend", about = "hostgen portal daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the portal API.
    Serve {
        /// Port to listen on (default 3001).
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for the hostname store.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path to hostgen.toml.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fail allocations instead of guessing when the store is unreadable.
        #[arg(long)]
        no_offline_fallback: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hostgend=debug,hostgen=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            data_dir,
            config,
            no_offline_fallback,
        } => {
            let file_config = HostgenConfig::load(config.as_deref())?;
            let port = port.unwrap_or_else(|| file_config.port());
            let data_dir = data_dir
                .or_else(|| file_config.data_dir().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
            let mut alloc_config = AllocatorConfig::from(&file_config);
            if no_offline_fallback {
                alloc_config.offline_fallback_enabled = false;
            }
            serve(port, data_dir, alloc_config).await
        }
    }
}

async fn serve(port: u16, data_dir: PathBuf, alloc_config: AllocatorConfig) -> anyhow::Result<()> {
    info!("hostgen daemon starting");

    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("hostgen.redb");

    let store = hostgen_state::StateStore::open(&db_path)?;
    info!(path = ?db_path, hostnames = store.count_hostnames()?, "hostname store opened");
    info!(
        offline_fallback = alloc_config.offline_fallback_enabled,
        max_attempts = alloc_config.max_attempts,
        segment_parsing = alloc_config.segment_parsing.label(),
        "allocator configured"
    );

    let router = hostgen_api::build_router(store, alloc_config);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("hostgen daemon stopped");
    Ok(())
}
