// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Proofchain Node
//!
//! Entry point for the `proofchain-node` binary. Parses CLI arguments,
//! initializes logging and metrics, commits the genesis entry, and serves
//! the chain over HTTP.
//!
//! The binary supports two subcommands:
//!
//! - `run`     - create genesis and start serving
//! - `version` - print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use proofchain::mining::{EntryProducer, Miner};
use proofchain::storage::ChainStore;

use cli::{Commands, ProofchainNodeCli};
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ProofchainNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the node: genesis, API server, and metrics endpoint.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(args.log_format).context("failed to initialize logging")?;

    let config = args.chain_config();
    config.validate().context("invalid chain configuration")?;

    tracing::info!(
        port = args.port,
        metrics_port = args.metrics_port,
        difficulty = config.difficulty,
        pace_ms = args.pace_ms,
        max_attempts = ?config.max_attempts,
        "starting proofchain-node"
    );

    // --- Genesis ---
    // Committed before any listener is bound, so no request can observe an
    // empty chain.
    let store = Arc::new(ChainStore::initialize(config.difficulty));
    let genesis = store.tail();
    tracing::info!(
        digest = %genesis.digest,
        timestamp = %genesis.timestamp,
        difficulty = genesis.difficulty,
        "genesis entry committed"
    );

    // --- Producer ---
    let producer = Arc::new(EntryProducer::new(
        Arc::clone(&store),
        Miner::from_chain_config(&config),
    ));

    // --- Metrics ---
    let node_metrics = Arc::new(NodeMetrics::new());
    node_metrics.record_chain_length(store.len() as u64);

    // --- Application state ---
    let app_state = api::AppState {
        store: Arc::clone(&store),
        producer: Arc::clone(&producer),
        metrics: Arc::clone(&node_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", api_addr))?;
    tracing::info!("HTTP server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }

    // In-flight searches run on the blocking pool, which the runtime waits
    // on at exit. Cancel them so that wait is short.
    producer.shutdown();
    tracing::info!(length = store.len(), "proofchain-node stopped");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("proofchain-node {}", env!("CARGO_PKG_VERSION"));
    println!("rustc           {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
