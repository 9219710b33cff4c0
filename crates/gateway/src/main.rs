//! Storage gateway binary.
//!
//! Routes the uniform filesystem RPC surface to the storage providers
//! registered with the storage registry, resolving share references
//! and handing out signed transfer tokens on the way.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use url::Url;

use gateway::{http_server, init_logging, Config, ServiceState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on for RPC requests
    #[arg(long, default_value = "0.0.0.0:19000")]
    listen_addr: SocketAddr,

    /// Name of the share folder mounted under /home
    #[arg(long, default_value = "MyShares")]
    share_folder: String,

    /// Data gateway endpoint handed to clients for non-exposed transfers
    #[arg(long)]
    data_gateway_endpoint: String,

    /// Transfer token validity, in seconds
    #[arg(long, default_value = "3600")]
    transfer_expires_seconds: u64,

    /// Shared secret between this gateway and the data gateway
    #[arg(long, env = "TRANSFER_SHARED_SECRET")]
    transfer_shared_secret: String,

    /// Endpoint of the storage registry
    #[arg(long)]
    storage_registry: Url,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for log files (stdout only if not set)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config {
        listen_addr: args.listen_addr,
        share_folder: args.share_folder,
        data_gateway_endpoint: args.data_gateway_endpoint,
        transfer_expires_seconds: args.transfer_expires_seconds,
        transfer_shared_secret: args.transfer_shared_secret,
        storage_registry_endpoint: args.storage_registry,
        log_level: args.log_level.parse().unwrap_or(tracing::Level::INFO),
        log_dir: args.log_dir,
    };

    let _guards = init_logging(&config);
    tracing::info!("starting storage gateway");

    let state = match ServiceState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("failed to create service state: {}", e);
            std::process::exit(1);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(());
    });

    http_server::run(config, state, shutdown_rx).await?;

    tracing::info!("gateway shutdown complete");
    Ok(())
}
