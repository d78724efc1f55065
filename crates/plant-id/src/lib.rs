//! Client for the Plant.id v3 identification API.
//!
//! This crate owns the outbound half of an analysis: it encodes the image,
//! issues a single POST with the fixed identification options, and hands
//! back the provider's raw `result` document. It never retries and never
//! interprets probabilities; shaping the response is left to the caller.

pub mod client;
pub mod error;
pub mod provider;
pub mod request;
pub mod response;

pub use client::{ClientConfig, PlantIdClient};
pub use error::{ProviderError, Result};
pub use provider::{IdentificationProvider, StaticProvider};
pub use request::{GeoHint, IdentificationRequest};
pub use response::{
    ClassificationDetails, DescriptionText, DiseaseDetails, ProbabilityField, ProviderResponse,
    ProviderResult, SimilarImage, Suggestion, Suggestions, Treatment,
};
