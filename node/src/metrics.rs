//! # Prometheus Metrics
//!
//! Operational metrics for the node, scraped at `/metrics` on the
//! configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so they
//! do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use parking_lot::Mutex;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
#[derive(Clone)]
pub struct NodeMetrics {
    registry: Registry,
    /// Entries mined and committed.
    pub entries_appended_total: IntCounter,
    /// Mined candidates the store refused.
    pub append_rejections_total: IntCounter,
    /// Searches that stopped without an entry (cancelled or exhausted).
    pub mining_failures_total: IntCounter,
    /// Nonces hashed across all successful searches.
    pub mining_attempts_total: IntCounter,
    /// Append requests whose body could not be parsed.
    pub bad_requests_total: IntCounter,
    /// Entries in the chain, genesis included. Only moves up; write it
    /// through [`NodeMetrics::record_chain_length`].
    pub chain_length: IntGauge,
    chain_length_high: Arc<Mutex<i64>>,
    /// Time spent in successful nonce searches.
    pub mining_duration_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("proofchain".into()), None)
            .expect("failed to create prometheus registry");

        let entries_appended_total =
            IntCounter::new("entries_appended_total", "Total number of entries committed")
                .expect("metric creation");
        registry
            .register(Box::new(entries_appended_total.clone()))
            .expect("metric registration");

        let append_rejections_total = IntCounter::new(
            "append_rejections_total",
            "Mined candidates rejected by the chain store",
        )
        .expect("metric creation");
        registry
            .register(Box::new(append_rejections_total.clone()))
            .expect("metric registration");

        let mining_failures_total = IntCounter::new(
            "mining_failures_total",
            "Nonce searches that were cancelled or hit the attempt ceiling",
        )
        .expect("metric creation");
        registry
            .register(Box::new(mining_failures_total.clone()))
            .expect("metric registration");

        let mining_attempts_total = IntCounter::new(
            "mining_attempts_total",
            "Nonces hashed by successful searches",
        )
        .expect("metric creation");
        registry
            .register(Box::new(mining_attempts_total.clone()))
            .expect("metric registration");

        let bad_requests_total =
            IntCounter::new("bad_requests_total", "Malformed append requests")
                .expect("metric creation");
        registry
            .register(Box::new(bad_requests_total.clone()))
            .expect("metric registration");

        let chain_length = IntGauge::new("chain_length", "Number of entries in the chain")
            .expect("metric creation");
        registry
            .register(Box::new(chain_length.clone()))
            .expect("metric registration");

        let mining_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "mining_duration_seconds",
                "Wall time of successful nonce searches in seconds",
            )
            .buckets(vec![
                0.0001, 0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 120.0,
            ]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(mining_duration_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            entries_appended_total,
            append_rejections_total,
            mining_failures_total,
            mining_attempts_total,
            bad_requests_total,
            chain_length,
            chain_length_high: Arc::new(Mutex::new(0)),
            mining_duration_seconds,
        }
    }

    /// Raise the chain length gauge to `length`.
    ///
    /// Handlers finish in any order, so a smaller value reported late is
    /// ignored rather than winding the gauge back.
    pub fn record_chain_length(&self, length: u64) {
        let length = i64::try_from(length).unwrap_or(i64::MAX);
        let mut high = self.chain_length_high.lock();
        if length > *high {
            *high = length;
            self.chain_length.set(length);
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
