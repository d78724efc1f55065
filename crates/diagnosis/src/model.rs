//! Public result shape returned to API clients.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A normalized identification and health assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResult {
    pub meta: Meta,
    /// Serialized as `{}` when the provider suggested no classification.
    #[serde(serialize_with = "taxonomy_or_empty")]
    pub taxonomy: Option<Taxonomy>,
    pub health_assessment: HealthAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub scan_date: Value,
    pub is_plant_probability: f64,
    pub geo_mode: &'static str,
}

/// Top-ranked classification of the plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    pub scientific_name: String,
    pub probability: f64,
    pub common_names: Vec<String>,
    pub description: String,
    pub wiki_url: Option<String>,
    pub taxonomy_tree: Value,
    pub image_refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    pub healthy_probability: f64,
    pub is_healthy: bool,
    pub diseases: Vec<DiseaseEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseEntry {
    pub name: String,
    pub common_names: Vec<String>,
    pub probability: f64,
    pub description: String,
    pub treatments: Treatments,
    pub classification: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Treatments {
    pub chemical: Vec<String>,
    pub biological: Vec<String>,
    pub prevention: Vec<String>,
}

fn taxonomy_or_empty<S: Serializer>(
    taxonomy: &Option<Taxonomy>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match taxonomy {
        Some(taxonomy) => taxonomy.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_result() -> NormalizedResult {
        NormalizedResult {
            meta: Meta {
                scan_date: Value::Null,
                is_plant_probability: 0.0,
                geo_mode: "global_demo",
            },
            taxonomy: None,
            health_assessment: HealthAssessment {
                healthy_probability: 0.0,
                is_healthy: false,
                diseases: vec![],
            },
        }
    }

    #[test]
    fn missing_taxonomy_serializes_as_empty_object() {
        let value = serde_json::to_value(empty_result()).unwrap();
        assert_eq!(value["taxonomy"], json!({}));
    }

    #[test]
    fn present_taxonomy_serializes_fields() {
        let mut result = empty_result();
        result.taxonomy = Some(Taxonomy {
            scientific_name: "Rosa canina".into(),
            probability: 0.7,
            common_names: vec!["dog rose".into()],
            description: "A climbing rose.".into(),
            wiki_url: None,
            taxonomy_tree: json!({"genus": "Rosa"}),
            image_refs: vec![],
        });

        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value["taxonomy"]["scientific_name"], "Rosa canina");
        assert_eq!(value["taxonomy"]["wiki_url"], Value::Null);
        assert_eq!(value["taxonomy"]["taxonomy_tree"]["genus"], "Rosa");
    }
}
