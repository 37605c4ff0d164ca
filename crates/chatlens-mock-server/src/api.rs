use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use chatlens_shared::constants::{API_PREFIX, PATH_ANALYZE, PATH_INSIGHTS, PATH_MESSAGES};
use chatlens_shared::{AnalysisEnvelope, AnalyzeResponse, Message};

use crate::analysis::CannedInsights;
use crate::config::MockConfig;
use crate::error::MockError;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub canned: Arc<CannedInsights>,
    pub config: Arc<MockConfig>,
}

impl AppState {
    pub fn new(config: MockConfig, canned: CannedInsights) -> Self {
        Self {
            store: Store::new(),
            canned: Arc::new(canned),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route(&api_path(PATH_MESSAGES), get(list_messages).post(create_messages))
        .route(&api_path(PATH_INSIGHTS), get(list_insights))
        .route(&api_path(PATH_ANALYZE), post(analyze_messages))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Buddy, are you lost?",
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn create_messages(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Message>>, MockError> {
    let batch: Vec<Value> = serde_json::from_slice(&body)
        .map_err(|e| MockError::Validation(format!("body: {e}")))?;

    let received = batch.len();
    let batch = Store::validate_batch(batch)?;
    let stored = state.store.insert_messages(batch).await;

    info!(received, total = stored.len(), "Messages uploaded");
    Ok(Json(stored))
}

async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    let messages = state.store.messages().await;
    Json(messages.into_iter().map(|s| s.message).collect())
}

async fn analyze_messages(
    State(state): State<AppState>,
) -> Result<Json<AnalyzeResponse<AnalysisEnvelope>>, MockError> {
    if state.config.fail_analysis {
        warn!("Analysis requested while the failure switch is on");
        return Err(MockError::AnalysisUnavailable(
            "Analysis service unavailable".to_string(),
        ));
    }

    let messages = state.store.messages().await;
    if messages.is_empty() {
        return Err(MockError::NoMessages);
    }

    let mut results = Vec::new();
    for (analysis_type, data) in state.canned.analyze(&messages) {
        results.push(state.store.add_insight(analysis_type, data).await);
    }

    info!(messages = messages.len(), results = results.len(), "Analysis completed");
    Ok(Json(AnalyzeResponse {
        status: "completed".to_string(),
        results,
    }))
}

async fn list_insights(State(state): State<AppState>) -> Json<Vec<AnalysisEnvelope>> {
    Json(state.store.insights().await)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_on(state, listener).await
}

/// Serve on an already-bound listener, e.g. one on an ephemeral port.
pub async fn serve_on(state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %listener.local_addr()?, "Starting HTTP API server");

    axum::serve(listener, app).await?;

    Ok(())
}
