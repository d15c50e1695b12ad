//! # REST API
//!
//! Builds the axum router that exposes the chain over HTTP. All endpoints
//! share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path      | Description                                  |
//! |--------|-----------|----------------------------------------------|
//! | GET    | `/`       | Full chain, pretty-printed JSON              |
//! | POST   | `/`       | Mine and append an entry from `{"Data": n}`  |
//! | GET    | `/health` | Liveness probe                               |
//!
//! ## Append status codes
//!
//! | Status | When                                              |
//! |--------|---------------------------------------------------|
//! | 201    | Entry mined and committed; body is the entry      |
//! | 400    | Body is not `{"Data": <integer>}`                 |
//! | 409    | Store rejected the mined candidate                |
//! | 503    | Search cancelled or hit the attempt ceiling       |
//! | 500    | Mining task failed or response did not serialize  |

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use proofchain::mining::EntryProducer;
use proofchain::storage::ChainStore;
use proofchain::ProductionError;

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The chain. Handlers only read through it; appends go via `producer`.
    pub store: Arc<ChainStore>,
    /// Serialized mine-then-append pipeline over `store`.
    pub producer: Arc<EntryProducer>,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(read_chain_handler).post(append_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Body of `POST /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppendRequest {
    /// Payload of the new entry.
    #[serde(rename = "Data")]
    pub data: i64,
}

/// Generic error body returned on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` - returns 200 if the node is alive.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /` - the whole chain as of one instant.
async fn read_chain_handler(State(state): State<AppState>) -> Response {
    let chain = state.store.snapshot();
    pretty_json(StatusCode::OK, &chain)
}

/// `POST /` - mine an entry carrying `Data` and append it.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that a malformed request gets our error body, naming what was wrong.
/// Mining runs on the blocking pool; the request waits for it.
async fn append_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: AppendRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            state.metrics.bad_requests_total.inc();
            tracing::debug!(error = %e, "malformed append request");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("invalid append request: {}", e),
            );
        }
    };

    let producer = Arc::clone(&state.producer);
    let outcome = tokio::task::spawn_blocking(move || producer.produce(request.data)).await;

    match outcome {
        Ok(Ok(produced)) => {
            state.metrics.entries_appended_total.inc();
            state.metrics.mining_attempts_total.inc_by(produced.attempts);
            state
                .metrics
                .mining_duration_seconds
                .observe(produced.elapsed.as_secs_f64());
            // The committed index fixes the length at commit time; reading
            // the store here could race a later append.
            let length = produced.entry.index.saturating_add(1);
            state.metrics.record_chain_length(length);
            tracing::debug!(length, "chain extended");

            pretty_json(StatusCode::CREATED, &produced.entry)
        }
        Ok(Err(ProductionError::Rejected(reason))) => {
            state.metrics.append_rejections_total.inc();
            error_response(StatusCode::CONFLICT, format!("entry rejected: {}", reason))
        }
        Ok(Err(ProductionError::Mining(e))) => {
            state.metrics.mining_failures_total.inc();
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
        Err(e) => {
            tracing::error!("mining task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "mining task failed".to_string(),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render `value` as indented JSON. A serialization failure becomes a 500,
/// never a panic.
fn pretty_json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (status, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!("failed to serialize response: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to serialize response".to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use proofchain::mining::{Miner, MinerConfig};
    use proofchain::storage::Entry;
    use proofchain::validation::verify_chain;
    use tower::ServiceExt;

    /// Creates a test AppState with a fresh chain at the given difficulty.
    fn test_app_state(miner_config: MinerConfig) -> AppState {
        let store = Arc::new(ChainStore::initialize(miner_config.difficulty));
        let producer = Arc::new(EntryProducer::new(
            Arc::clone(&store),
            Miner::new(miner_config),
        ));
        AppState {
            store,
            producer,
            metrics: Arc::new(crate::metrics::NodeMetrics::new()),
        }
    }

    fn default_state() -> AppState {
        test_app_state(MinerConfig::with_difficulty(1))
    }

    /// Sends a GET request and returns the (status, body_bytes).
    async fn get(router: &Router, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        send(router, req).await
    }

    /// Sends a POST request with a raw body and returns (status, body_bytes).
    async fn post_raw(router: &Router, path: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, req).await
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        (status, body)
    }

    // -- 1. Health ------------------------------------------------------------

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let router = create_router(default_state());
        let (status, body) = get(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    // -- 2. Read chain --------------------------------------------------------

    #[tokio::test]
    async fn read_chain_returns_genesis() {
        let router = create_router(default_state());
        let (status, body) = get(&router, "/").await;

        assert_eq!(status, StatusCode::OK);
        let chain: Vec<Entry> = serde_json::from_slice(&body).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].index, 0);
        assert!(chain[0].prev_digest.is_empty());
    }

    #[tokio::test]
    async fn read_chain_is_pretty_printed_with_wire_names() {
        let router = create_router(default_state());
        let (_, body) = get(&router, "/").await;
        let text = String::from_utf8(body).unwrap();

        assert!(text.contains('\n'));
        for key in ["Index", "Timestamp", "Data", "Hash", "PrevHash", "Difficulty", "Nonce"] {
            assert!(text.contains(&format!("\"{}\"", key)), "missing {key}");
        }
    }

    // -- 3. Append ------------------------------------------------------------

    #[tokio::test]
    async fn append_returns_created_entry() {
        let state = default_state();
        let router = create_router(state.clone());
        let (status, body) = post_raw(&router, "/", r#"{"Data": 42}"#).await;

        assert_eq!(status, StatusCode::CREATED);
        let entry: Entry = serde_json::from_slice(&body).unwrap();
        assert_eq!(entry.index, 1);
        assert_eq!(entry.payload, 42);
        assert!(entry.meets_difficulty());
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.store.tail(), entry);
    }

    #[tokio::test]
    async fn appends_then_read_yield_valid_chain() {
        let state = default_state();
        let router = create_router(state.clone());
        for data in [1, 2, 3] {
            let (status, _) = post_raw(&router, "/", &format!(r#"{{"Data": {}}}"#, data)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = get(&router, "/").await;
        let chain: Vec<Entry> = serde_json::from_slice(&body).unwrap();
        assert_eq!(chain.len(), 4);
        assert!(verify_chain(&chain).is_ok());
        assert_eq!(state.metrics.entries_appended_total.get(), 3);
        assert_eq!(state.metrics.chain_length.get(), 4);
    }

    // -- 4. Malformed input ---------------------------------------------------

    #[tokio::test]
    async fn non_integer_data_is_bad_request() {
        let state = default_state();
        let router = create_router(state.clone());
        let (status, body) = post_raw(&router, "/", r#"{"Data": "forty-two"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.starts_with("invalid append request"));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.metrics.bad_requests_total.get(), 1);
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let state = default_state();
        let router = create_router(state.clone());
        let (status, _) = post_raw(&router, "/", "not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn missing_data_field_is_bad_request() {
        let state = default_state();
        let router = create_router(state.clone());
        let (status, body) = post_raw(&router, "/", r#"{"Payload": 1}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("Data"));
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn candidate_below_chain_difficulty_is_conflict() {
        let store = Arc::new(ChainStore::initialize(2));
        let producer = Arc::new(EntryProducer::new(
            Arc::clone(&store),
            Miner::new(MinerConfig::with_difficulty(1)),
        ));
        let state = AppState {
            store,
            producer,
            metrics: Arc::new(crate::metrics::NodeMetrics::new()),
        };
        let router = create_router(state.clone());
        let (status, body) = post_raw(&router, "/", r#"{"Data": 7}"#).await;

        assert_eq!(status, StatusCode::CONFLICT);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.starts_with("entry rejected"));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.metrics.append_rejections_total.get(), 1);
        assert_eq!(state.metrics.entries_appended_total.get(), 0);
    }

    // -- 5. Mining failures ---------------------------------------------------

    #[tokio::test]
    async fn append_after_shutdown_is_unavailable() {
        let state = default_state();
        state.producer.shutdown();
        let router = create_router(state.clone());
        let (status, body) = post_raw(&router, "/", r#"{"Data": 1}"#).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("cancelled"));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.metrics.mining_failures_total.get(), 1);
    }

    #[tokio::test]
    async fn exhausted_search_is_unavailable() {
        let state = test_app_state(MinerConfig {
            difficulty: proofchain::config::MAX_DIFFICULTY,
            max_attempts: Some(8),
        });
        let router = create_router(state.clone());
        let (status, _) = post_raw(&router, "/", r#"{"Data": 1}"#).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(state.store.len(), 1);
    }
}
