//! Log setup for the node.
//!
//! Output goes to stderr through `tracing-subscriber`. `RUST_LOG` wins over
//! [`DEFAULT_DIRECTIVES`] when it is set. Each nonce the miner tries is
//! logged at `trace` under the `proofchain` target.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "proofchain_node=info,proofchain=info,tower_http=debug";

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Colored text with source locations.
    #[default]
    Pretty,
    /// One flattened JSON object per event.
    Json,
}

/// `RUST_LOG` if it parses, `fallback` otherwise.
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the process-wide subscriber. Fails if one is already set.
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let events = match format {
        LogFormat::Pretty => fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer().json().flatten_event(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(events)
        .with(env_filter(DEFAULT_DIRECTIVES))
        .try_init()?;

    tracing::info!(?format, "logging ready");
    Ok(())
}
