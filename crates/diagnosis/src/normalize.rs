//! Provider result normalization.
//!
//! Reads the provider's nested document field by field, substituting named
//! defaults for anything optional, and applies the fixed health and disease
//! thresholds. Only suggestion names and probabilities are mandatory.

use plant_id::{ClassificationDetails, DiseaseDetails, ProviderResult, Suggestion};
use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::model::{DiseaseEntry, HealthAssessment, Meta, NormalizedResult, Taxonomy, Treatments};

/// A plant is reported healthy only above this probability.
pub const HEALTHY_THRESHOLD: f64 = 0.85;

/// Disease suggestions at or below this probability are dropped.
pub const DISEASE_THRESHOLD: f64 = 0.15;

/// Maximum number of similar-image URLs kept for the taxonomy.
pub const MAX_IMAGE_REFS: usize = 2;

/// Taxonomy description used when the provider sends none.
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Marks results produced without a location bias.
pub const GEO_MODE: &str = "global_demo";

/// Converts a raw provider result into the public result shape.
pub fn normalize(result: &ProviderResult) -> Result<NormalizedResult, NormalizeError> {
    let meta = Meta {
        scan_date: result.created.clone(),
        is_plant_probability: result.plant_probability(),
        geo_mode: GEO_MODE,
    };

    let taxonomy = result
        .classification_suggestions()
        .first()
        .map(taxonomy_from)
        .transpose()?;

    let healthy_probability = result.healthy_probability();
    let diseases = result
        .disease_suggestions()
        .iter()
        .enumerate()
        .filter_map(|(rank, suggestion)| match suggestion.probability {
            Some(p) if p > DISEASE_THRESHOLD => Some(disease_from(rank, suggestion, p)),
            Some(_) => None,
            None => Some(Err(missing("disease", "probability", rank))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NormalizedResult {
        meta,
        taxonomy,
        health_assessment: HealthAssessment {
            healthy_probability,
            is_healthy: healthy_probability > HEALTHY_THRESHOLD,
            diseases,
        },
    })
}

fn taxonomy_from(top: &Suggestion<ClassificationDetails>) -> Result<Taxonomy, NormalizeError> {
    let scientific_name = top
        .name
        .clone()
        .ok_or_else(|| missing("classification", "name", 0))?;
    let probability = top
        .probability
        .ok_or_else(|| missing("classification", "probability", 0))?;

    let details = top.details.clone().unwrap_or_default();
    let description = details
        .description
        .and_then(|d| d.value)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let taxonomy_tree = match details.taxonomy {
        Value::Null => Value::Object(Map::new()),
        tree => tree,
    };
    let image_refs = top
        .similar_images
        .iter()
        .filter_map(|image| image.url.clone())
        .take(MAX_IMAGE_REFS)
        .collect();

    Ok(Taxonomy {
        scientific_name,
        probability,
        common_names: details.common_names,
        description,
        wiki_url: details.url,
        taxonomy_tree,
        image_refs,
    })
}

fn disease_from(
    rank: usize,
    suggestion: &Suggestion<DiseaseDetails>,
    probability: f64,
) -> Result<DiseaseEntry, NormalizeError> {
    let name = suggestion
        .name
        .clone()
        .ok_or_else(|| missing("disease", "name", rank))?;
    let details = suggestion.details.clone().unwrap_or_default();
    let treatment = details.treatment.unwrap_or_default();

    Ok(DiseaseEntry {
        name,
        common_names: details.common_names,
        probability,
        description: details.description.unwrap_or_default(),
        treatments: Treatments {
            chemical: treatment.chemical,
            biological: treatment.biological,
            prevention: treatment.prevention,
        },
        classification: details.classification,
    })
}

fn missing(section: &'static str, field: &'static str, rank: usize) -> NormalizeError {
    NormalizeError::MissingField {
        section,
        field,
        rank,
    }
}
