//! Raw provider response types.
//!
//! These mirror the parts of the Plant.id v3 `result` document that the
//! service reads. Everything inside `result` is lenient: an absent field,
//! an explicit `null`, or a value of an unexpected type deserializes to its
//! default instead of failing the whole response. Whether a defaulted
//! field matters is decided by the normalizer, which only reads the
//! suggestions it keeps.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level body returned by the identification endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub result: Option<ProviderResult>,
}

/// The `result` object of an identification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResult {
    /// Scan timestamp as sent by the provider, passed through untouched.
    #[serde(default, deserialize_with = "lenient")]
    pub created: Value,
    #[serde(default, deserialize_with = "lenient")]
    pub is_plant: Option<ProbabilityField>,
    #[serde(default, deserialize_with = "lenient")]
    pub classification: Option<Suggestions<ClassificationDetails>>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_healthy: Option<ProbabilityField>,
    #[serde(default, deserialize_with = "lenient")]
    pub disease: Option<Suggestions<DiseaseDetails>>,
}

impl ProviderResult {
    /// Probability that the image contains a plant, `0.0` when absent.
    pub fn plant_probability(&self) -> f64 {
        self.is_plant
            .as_ref()
            .and_then(|p| p.probability)
            .unwrap_or(0.0)
    }

    /// Probability that the plant is healthy, `0.0` when absent.
    pub fn healthy_probability(&self) -> f64 {
        self.is_healthy
            .as_ref()
            .and_then(|p| p.probability)
            .unwrap_or(0.0)
    }

    /// Ranked classification suggestions, empty when absent.
    pub fn classification_suggestions(&self) -> &[Suggestion<ClassificationDetails>] {
        self.classification
            .as_ref()
            .map(|s| s.suggestions.as_slice())
            .unwrap_or_default()
    }

    /// Ranked disease suggestions, empty when absent.
    pub fn disease_suggestions(&self) -> &[Suggestion<DiseaseDetails>] {
        self.disease
            .as_ref()
            .map(|s| s.suggestions.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbabilityField {
    #[serde(default, deserialize_with = "lenient")]
    pub probability: Option<f64>,
}

/// A ranked suggestion list, highest probability first.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct Suggestions<D> {
    #[serde(default, deserialize_with = "lenient")]
    pub suggestions: Vec<Suggestion<D>>,
}

impl<D> Default for Suggestions<D> {
    fn default() -> Self {
        Self {
            suggestions: Vec::new(),
        }
    }
}

/// One candidate match. `name` and `probability` are expected on every
/// suggestion but are kept optional so the caller decides how to treat a
/// violation.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct Suggestion<D> {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub probability: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<D>,
    #[serde(default, deserialize_with = "lenient")]
    pub similar_images: Vec<SimilarImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimilarImage {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// Details attached to a classification suggestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub common_names: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<DescriptionText>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    /// Full taxonomy tree, opaque.
    #[serde(default, deserialize_with = "lenient")]
    pub taxonomy: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptionText {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<String>,
}

/// Details attached to a disease suggestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiseaseDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub common_names: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub treatment: Option<Treatment>,
    #[serde(default, deserialize_with = "lenient")]
    pub classification: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Treatment {
    #[serde(default, deserialize_with = "lenient")]
    pub chemical: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub biological: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub prevention: Vec<String>,
}

/// Reads any JSON value and converts it to `T`, falling back to
/// `T::default()` when the shape does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
