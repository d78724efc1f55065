//! Identification provider trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::request::GeoHint;
use crate::response::ProviderResult;

/// A service that identifies a plant and assesses its health from one image.
#[async_trait]
pub trait IdentificationProvider: Send + Sync {
    /// Submits raw image bytes and returns the provider's `result` document.
    async fn identify(&self, image: &[u8], geo: GeoHint) -> Result<ProviderResult, ProviderError>;
}

#[derive(Debug)]
struct StaticProviderState {
    response: Result<ProviderResult, ProviderError>,
    calls: usize,
    last_geo: Option<GeoHint>,
    last_image_len: Option<usize>,
}

/// In-memory provider that answers every call with a canned outcome.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    state: Arc<RwLock<StaticProviderState>>,
}

impl StaticProvider {
    /// Creates a provider that always returns `result`.
    pub fn new(result: ProviderResult) -> Self {
        Self::with_response(Ok(result))
    }

    /// Creates a provider that always fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<ProviderResult, ProviderError>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StaticProviderState {
                response,
                calls: 0,
                last_geo: None,
                last_image_len: None,
            })),
        }
    }

    /// Replaces the canned result.
    pub fn set_result(&self, result: ProviderResult) {
        self.state.write().unwrap().response = Ok(result);
    }

    /// Replaces the canned outcome with a failure.
    pub fn set_error(&self, error: ProviderError) {
        self.state.write().unwrap().response = Err(error);
    }

    /// Returns how many times `identify` has been called.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls
    }

    /// Returns the location hint passed on the most recent call.
    pub fn last_geo(&self) -> Option<GeoHint> {
        self.state.read().unwrap().last_geo
    }

    /// Returns the image size seen on the most recent call.
    pub fn last_image_len(&self) -> Option<usize> {
        self.state.read().unwrap().last_image_len
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new(ProviderResult::default())
    }
}

#[async_trait]
impl IdentificationProvider for StaticProvider {
    async fn identify(&self, image: &[u8], geo: GeoHint) -> Result<ProviderResult, ProviderError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        state.last_geo = Some(geo);
        state.last_image_len = Some(image.len());
        state.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_canned_result_and_records_call() {
        let provider = StaticProvider::default();

        let result = provider.identify(b"abc", GeoHint::none()).await;
        assert!(result.is_ok());
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_image_len(), Some(3));
        assert_eq!(provider.last_geo(), Some(GeoHint::none()));
    }

    #[tokio::test]
    async fn failing_provider_returns_error() {
        let provider = StaticProvider::failing(ProviderError::Timeout);

        let err = provider.identify(b"abc", GeoHint::none()).await.unwrap_err();
        assert_eq!(err, ProviderError::Timeout);
    }

    #[tokio::test]
    async fn outcome_can_be_swapped() {
        let provider = StaticProvider::default();
        provider.set_error(ProviderError::MalformedResponse);
        assert!(provider.identify(b"", GeoHint::none()).await.is_err());

        provider.set_result(ProviderResult::default());
        assert!(provider.identify(b"", GeoHint::none()).await.is_ok());
        assert_eq!(provider.call_count(), 2);
    }
}
