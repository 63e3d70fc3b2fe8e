//! REST API server for the in-memory collection store.
//!
//! Composition root: parses configuration, builds the seeded store,
//! wires it into the router, and serves until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use memstore_api::{config::ServerConfig, router::Router, server::Server};
use memstore_core::KeyedCollectionStore;

/// Command-line arguments for the API server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Request body read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Start with empty collections instead of the seed data
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(if args.no_seed {
        KeyedCollectionStore::new()
    } else {
        KeyedCollectionStore::with_seed_data()
    });

    let config = Arc::new(ServerConfig {
        host: args.host,
        port: args.port,
        request_timeout_ms: args.request_timeout_ms,
    });

    let addr: SocketAddr = config.bind_addr().parse()?;
    let router = Router::new(store, config);
    let server = Server::new(addr, router);

    tracing::info!(%addr, seeded = !args.no_seed, "starting memstore server");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("server error: {}", e);
        }
    });

    signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server_handle.abort();

    Ok(())
}
