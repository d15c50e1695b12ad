//! # CLI Interface
//!
//! Defines the command-line argument structure for `proofchain-node` using
//! `clap` derive. Every `run` flag can also come from the environment.

use std::time::Duration;

use clap::{Parser, Subcommand};
use proofchain::config::{ChainConfig, DEFAULT_DIFFICULTY, DEFAULT_HTTP_PORT, DEFAULT_METRICS_PORT};

use crate::logging::LogFormat;

/// Proofchain node.
///
/// Serves a single in-memory, proof-of-work gated append log over HTTP and
/// exposes Prometheus metrics.
#[derive(Parser, Debug)]
#[command(
    name = "proofchain-node",
    about = "Proof-of-work append log node",
    version,
    propagate_version = true
)]
pub struct ProofchainNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create genesis and start serving the chain.
    Run(RunArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the HTTP API.
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Leading zero hex characters every mined digest must carry.
    #[arg(long, short = 'd', env = "DIFFICULTY", default_value_t = DEFAULT_DIFFICULTY)]
    pub difficulty: u32,

    /// Milliseconds to sleep between failed mining attempts. 0 disables
    /// pacing.
    #[arg(long, env = "PACE_MS", default_value_t = 0)]
    pub pace_ms: u64,

    /// Give up mining an entry after this many nonces.
    ///
    /// Unset means the search runs until it succeeds or the node shuts down.
    #[arg(long, env = "MAX_ATTEMPTS")]
    pub max_attempts: Option<u64>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, ignore_case = true, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl RunArgs {
    /// The chain configuration these arguments describe. Not yet validated.
    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            difficulty: self.difficulty,
            pacing: Duration::from_millis(self.pace_ms),
            max_attempts: self.max_attempts,
        }
    }
}
