//! HTTP API server for plant identification and health analysis.
//!
//! Accepts a plant photo by URL or inline base64, runs one identification
//! against the provider and returns the normalized diagnosis, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod image_source;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use diagnosis::Analyzer;
use metrics_exporter_prometheus::PrometheusHandle;
use plant_id::{IdentificationProvider, PlantIdClient};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::{ApiError, StartupError};
use image_source::ImageFetcher;
use routes::analyze::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P: IdentificationProvider + 'static>(
    state: Arc<AppState<P>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::scrape))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/agrosync-api/analyze", post(routes::analyze::analyze::<P>))
        .with_state(state)
        .merge(metrics_router)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the production state backed by the Plant.id client.
pub fn create_default_state(config: &Config) -> Result<Arc<AppState<PlantIdClient>>, StartupError> {
    let client = PlantIdClient::new(config.client_config())?;
    let fetcher = ImageFetcher::new(config.image_fetch_timeout)?;

    Ok(Arc::new(AppState::new(Analyzer::new(client), fetcher)))
}

fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
