//! Analysis service chaining identification and normalization.

use plant_id::{GeoHint, IdentificationProvider};

use crate::error::AnalysisError;
use crate::model::NormalizedResult;
use crate::normalize::normalize;

/// Runs one identification per image and normalizes the outcome.
///
/// Identification always runs in global mode: location hints are never
/// forwarded, whatever the caller knows about where the photo was taken.
pub struct Analyzer<P: IdentificationProvider> {
    provider: P,
}

impl<P: IdentificationProvider> Analyzer<P> {
    /// Creates an analyzer backed by the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Identifies the plant in `image` and returns the normalized result.
    #[tracing::instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn analyze(&self, image: &[u8]) -> Result<NormalizedResult, AnalysisError> {
        metrics::counter!("analyses_total").increment(1);
        tracing::info!(geo_mode = crate::GEO_MODE, "processing image");

        let outcome = match self.provider.identify(image, GeoHint::none()).await {
            Ok(raw) => normalize(&raw).map_err(AnalysisError::from),
            Err(err) => Err(AnalysisError::from(err)),
        };

        match &outcome {
            Ok(result) => tracing::info!(
                taxonomy = result.taxonomy.is_some(),
                diseases = result.health_assessment.diseases.len(),
                healthy = result.health_assessment.is_healthy,
                "analysis complete"
            ),
            Err(err) => {
                metrics::counter!("analyses_failed_total", "kind" => err.kind()).increment(1);
                tracing::error!(kind = err.kind(), error = %err, "analysis failed");
            }
        }

        outcome
    }
}
