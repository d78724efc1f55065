//! Plant diagnosis: from a raw identification to the public result shape.
//!
//! [`normalize`] is a pure, single-pass transform over a
//! [`plant_id::ProviderResult`]. [`Analyzer`] wires an identification
//! provider to it and is what the HTTP layer calls per request.

pub mod analyzer;
pub mod error;
pub mod model;
pub mod normalize;

pub use analyzer::Analyzer;
pub use error::{AnalysisError, NormalizeError};
pub use model::{DiseaseEntry, HealthAssessment, Meta, NormalizedResult, Taxonomy, Treatments};
pub use normalize::{
    DEFAULT_DESCRIPTION, DISEASE_THRESHOLD, GEO_MODE, HEALTHY_THRESHOLD, MAX_IMAGE_REFS, normalize,
};
