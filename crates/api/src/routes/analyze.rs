//! Plant analysis endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use diagnosis::{Analyzer, NormalizedResult};
use plant_id::IdentificationProvider;
use serde_json::Value;

use crate::error::ApiError;
use crate::image_source::{AnalyzeRequest, ImageFetcher};

/// Shared application state accessible from all handlers.
pub struct AppState<P: IdentificationProvider> {
    pub analyzer: Analyzer<P>,
    pub fetcher: ImageFetcher,
}

impl<P: IdentificationProvider> AppState<P> {
    pub fn new(analyzer: Analyzer<P>, fetcher: ImageFetcher) -> Self {
        Self { analyzer, fetcher }
    }
}

/// POST /agrosync-api/analyze: identify a plant and assess its health.
///
/// Accepts exactly one of `image_url` or `image_base64`. Provider failures
/// are reported as 502 with the provider's message.
#[tracing::instrument(skip_all, fields(analysis_id = %uuid::Uuid::new_v4()))]
pub async fn analyze<P: IdentificationProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<NormalizedResult>, ApiError> {
    let Json(body) = payload?;

    let request: AnalyzeRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;
    let source = request.into_source()?;

    let image = state.fetcher.resolve(source).await?;
    tracing::info!(image_bytes = image.len(), "image resolved");

    let result = state.analyzer.analyze(&image).await?;
    Ok(Json(result))
}
