//! Prometheus scrape endpoint for analysis and provider counters.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics: `analyses_total`, `analyses_failed_total` and the
/// `plant_id_*` request series.
///
/// Histograms are drained before rendering so a scrape never reports stale
/// buckets when no background upkeep task is running.
pub async fn scrape(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.run_upkeep();
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], handle.render())
}
