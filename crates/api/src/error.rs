//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use diagnosis::AnalysisError;
use plant_id::ProviderError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::image_source::ImageSourceError;

/// Message returned for any failure whose detail must stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The body is not JSON.
    UnsupportedMediaType(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The body could not be read at all (too large, aborted); keeps the
    /// extractor's own status.
    Rejected { status: StatusCode, message: String },
    /// The identification provider failed or broke its contract.
    Upstream(AnalysisError),
    /// Internal server error; the detail is logged, never returned.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected { status, message } => (status, message),
            ApiError::Upstream(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "request body rejected");
        match rejection {
            JsonRejection::MissingJsonContentType(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::JsonDataError(_) => {
                ApiError::UnsupportedMediaType("Request body must be JSON".to_string())
            }
            other => ApiError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::Upstream(err)
    }
}

impl From<ImageSourceError> for ApiError {
    fn from(err: ImageSourceError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Failures that stop the server before it accepts traffic.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("identification client error: {0}")]
    Provider(#[from] ProviderError),

    #[error("image fetch client error: {0}")]
    ImageFetcher(#[from] reqwest::Error),
}
