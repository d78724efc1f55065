//! HTTP client for the Plant.id identification endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ProviderError;
use crate::provider::IdentificationProvider;
use crate::request::{GeoHint, IdentificationRequest};
use crate::response::{ProviderResponse, ProviderResult};

/// Connection settings for [`PlantIdClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.plant.id/v3/identification";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Settings for the public endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Calls the Plant.id API once per identification. No retries.
#[derive(Debug, Clone)]
pub struct PlantIdClient {
    http: Client,
    config: ClientConfig,
}

impl PlantIdClient {
    /// Creates a client whose requests are bounded by `config.timeout`.
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        tracing::info!(endpoint = %config.endpoint, timeout = ?config.timeout, "Plant.id client configured");

        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn send(&self, body: &IdentificationRequest) -> Result<ProviderResult, ProviderError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let parsed: ProviderResponse =
            serde_json::from_slice(&bytes).map_err(|_| ProviderError::MalformedResponse)?;

        parsed.result.ok_or(ProviderError::MalformedResponse)
    }
}

#[async_trait]
impl IdentificationProvider for PlantIdClient {
    #[tracing::instrument(skip(self, image), fields(image_bytes = image.len(), global = geo.is_global()))]
    async fn identify(&self, image: &[u8], geo: GeoHint) -> Result<ProviderResult, ProviderError> {
        let body = IdentificationRequest::new(image, geo);
        let start = Instant::now();

        let outcome = self.send(&body).await;

        let elapsed = start.elapsed().as_secs_f64();
        metrics::histogram!("plant_id_request_duration_seconds").record(elapsed);

        match &outcome {
            Ok(_) => {
                metrics::counter!("plant_id_requests_total", "outcome" => "ok").increment(1);
                tracing::debug!(elapsed, "Plant.id identification succeeded");
            }
            Err(err) => {
                metrics::counter!("plant_id_requests_total", "outcome" => err.kind()).increment(1);
                tracing::warn!(elapsed, kind = err.kind(), error = %err, "Plant.id identification failed");
            }
        }

        outcome
    }
}
