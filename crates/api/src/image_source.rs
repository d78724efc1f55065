//! Resolving the image named by an analyze request into raw bytes.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Body of `POST /agrosync-api/analyze`.
///
/// Location fields are deliberately not read; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub image_url: Option<String>,
    pub image_base64: Option<String>,
}

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Inline(String),
}

#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("Missing 'image_url' or 'image_base64'")]
    Missing,

    #[error("Provide only one of 'image_url' or 'image_base64'")]
    Ambiguous,

    #[error("Could not download image from URL: {0}")]
    Download(String),

    #[error("Invalid base64")]
    InvalidBase64,

    #[error("Image is empty")]
    Empty,
}

impl AnalyzeRequest {
    /// Picks the single image source; both or neither is an error.
    pub fn into_source(self) -> Result<ImageSource, ImageSourceError> {
        match (self.image_url, self.image_base64) {
            (Some(url), None) => Ok(ImageSource::Url(url)),
            (None, Some(data)) => Ok(ImageSource::Inline(data)),
            (Some(_), Some(_)) => Err(ImageSourceError::Ambiguous),
            (None, None) => Err(ImageSourceError::Missing),
        }
    }
}

/// Drops a data-URI header: everything up to and including the first comma.
pub fn strip_data_uri(data: &str) -> &str {
    data.split_once(',').map_or(data, |(_, payload)| payload)
}

/// Decodes inline base64 image data, with or without a data-URI header.
///
/// Whitespace anywhere in the payload is ignored, so line-wrapped (MIME
/// style) encodings decode the same as unwrapped ones.
pub fn decode_inline(data: &str) -> Result<Vec<u8>, ImageSourceError> {
    let payload: String = strip_data_uri(data)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| ImageSourceError::InvalidBase64)?;

    if bytes.is_empty() {
        return Err(ImageSourceError::Empty);
    }
    Ok(bytes)
}

/// Downloads images referenced by URL. One attempt, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http: Client,
}

impl ImageFetcher {
    /// Creates a fetcher whose downloads are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Downloads `url`, treating any non-success status as a failure.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageSourceError> {
        tracing::info!("downloading image");

        let bytes = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ImageSourceError::Download(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| ImageSourceError::Download(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ImageSourceError::Empty);
        }
        Ok(bytes.to_vec())
    }

    /// Produces the image bytes for `source`.
    pub async fn resolve(&self, source: ImageSource) -> Result<Vec<u8>, ImageSourceError> {
        match source {
            ImageSource::Url(url) => self.fetch(&url).await,
            ImageSource::Inline(data) => decode_inline(&data),
        }
    }
}
