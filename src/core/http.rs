//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use super::refresh::{DashboardData, RefreshEngine};
use crate::indicators::calculate_sma;
use crate::metrics::Metrics;
use crate::models::WeeklySeries;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<RefreshEngine>,
    pub public_dir: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str, details: impl ToString) -> ApiError {
    (
        status,
        Json(json!({ "error": message, "details": details.to_string() })),
    )
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let health = state.health.read().await;
    Json(json!({
        "status": health.status,
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": "btc-tracker"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Run a refresh cycle and return the dashboard payload
async fn bitcoin_data(State(state): State<AppState>) -> Result<Json<DashboardData>, ApiError> {
    info!("Fetching Bitcoin data");
    let report = state.engine.refresh().await.map_err(|e| {
        error!(error = %e, "Error in /api/bitcoin-data");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch Bitcoin data",
            e,
        )
    })?;

    if let Some(ref e) = report.persist_error {
        warn!(error = %e, "Serving unpersisted weekly series");
    }

    Ok(Json(report.data.as_ref().clone()))
}

/// Persisted weekly series, without refreshing
async fn weekly_prices(State(state): State<AppState>) -> Result<Json<WeeklySeries>, ApiError> {
    state.engine.weekly_prices().await.map(Json).map_err(|e| {
        error!(error = %e, "Failed to load weekly prices");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load weekly prices",
            e,
        )
    })
}

/// Self-check of the moving average on a fixed series (expects 107)
async fn verify_ma() -> Json<Value> {
    let test_data: Vec<f64> = (100..110).map(f64::from).collect();
    Json(json!({ "success": true, "test": calculate_sma(&test_data, 5) }))
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/bitcoin-data", get(bitcoin_data))
        .route("/api/weekly-prices", get(weekly_prices))
        .route("/api/verify-ma", get(verify_ma));

    if let Some(ref dir) = state.public_dir {
        info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "Bitcoin Tracker server running on http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
