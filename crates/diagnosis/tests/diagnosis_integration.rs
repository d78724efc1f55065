//! End-to-end normalization of a realistic provider document.

use diagnosis::{Analyzer, DEFAULT_DESCRIPTION, GEO_MODE, normalize};
use plant_id::{ProviderResult, StaticProvider};
use serde_json::{Value, json};

fn tomato_scan() -> Value {
    json!({
        "created": 1718022445.3,
        "is_plant": { "probability": 0.995, "threshold": 0.5, "binary": true },
        "classification": { "suggestions": [
            {
                "id": "a1",
                "name": "Solanum lycopersicum",
                "probability": 0.93,
                "similar_images": [
                    { "id": "i1", "url": "https://plant.id/media/1.jpg", "similarity": 0.8 },
                    { "id": "i2", "url": "https://plant.id/media/2.jpg", "similarity": 0.7 },
                    { "id": "i3", "url": "https://plant.id/media/3.jpg", "similarity": 0.6 }
                ],
                "details": {
                    "common_names": ["tomato", "garden tomato"],
                    "url": "https://en.wikipedia.org/wiki/Tomato",
                    "description": { "value": "The tomato is the edible berry of the plant Solanum lycopersicum." },
                    "taxonomy": {
                        "class": "Magnoliopsida",
                        "genus": "Solanum",
                        "order": "Solanales",
                        "family": "Solanaceae",
                        "phylum": "Tracheophyta",
                        "kingdom": "Plantae"
                    }
                }
            },
            { "id": "a2", "name": "Solanum pimpinellifolium", "probability": 0.04 }
        ]},
        "is_healthy": { "probability": 0.12, "threshold": 0.525, "binary": false },
        "disease": { "suggestions": [
            {
                "name": "Fungi",
                "probability": 0.81,
                "details": {
                    "common_names": null,
                    "description": "Fungi take energy from the plants on which they live.",
                    "treatment": {
                        "chemical": ["Apply fungicide early."],
                        "biological": ["Apply Trichoderma-based products."],
                        "prevention": ["Avoid overhead irrigation."]
                    },
                    "classification": ["Fungi"]
                }
            },
            { "name": "water excess or uneven watering", "probability": 0.15 },
            { "name": "Early blight", "probability": 0.33, "details": { "classification": ["Fungi", "Alternaria"] } },
            { "name": "nutrient deficiency", "probability": 0.07 }
        ]}
    })
}

#[test]
fn test_realistic_scan_normalizes() {
    let raw: ProviderResult = serde_json::from_value(tomato_scan()).unwrap();
    let value = serde_json::to_value(normalize(&raw).unwrap()).unwrap();

    assert_eq!(value["meta"]["scan_date"], json!(1718022445.3));
    assert_eq!(value["meta"]["is_plant_probability"], json!(0.995));
    assert_eq!(value["meta"]["geo_mode"], GEO_MODE);

    let taxonomy = &value["taxonomy"];
    assert_eq!(taxonomy["scientific_name"], "Solanum lycopersicum");
    assert_eq!(taxonomy["probability"], json!(0.93));
    assert_eq!(taxonomy["common_names"], json!(["tomato", "garden tomato"]));
    assert_eq!(taxonomy["wiki_url"], "https://en.wikipedia.org/wiki/Tomato");
    assert_eq!(taxonomy["taxonomy_tree"]["family"], "Solanaceae");
    assert_eq!(
        taxonomy["image_refs"],
        json!(["https://plant.id/media/1.jpg", "https://plant.id/media/2.jpg"])
    );
    assert_ne!(taxonomy["description"], DEFAULT_DESCRIPTION);

    let health = &value["health_assessment"];
    assert_eq!(health["healthy_probability"], json!(0.12));
    assert_eq!(health["is_healthy"], false);

    let diseases = health["diseases"].as_array().unwrap();
    let names: Vec<&str> = diseases.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Fungi", "Early blight"]);
    assert_eq!(diseases[0]["common_names"], json!([]));
    assert_eq!(diseases[0]["treatments"]["prevention"], json!(["Avoid overhead irrigation."]));
    assert_eq!(diseases[1]["description"], "");
    assert_eq!(diseases[1]["treatments"]["chemical"], json!([]));
    assert_eq!(diseases[1]["classification"], json!(["Fungi", "Alternaria"]));
}

#[tokio::test]
async fn test_analyzer_runs_in_global_mode() {
    let raw: ProviderResult = serde_json::from_value(tomato_scan()).unwrap();
    let analyzer = Analyzer::new(StaticProvider::new(raw));

    let result = analyzer.analyze(&[0x89, 0x50, 0x4e, 0x47]).await.unwrap();

    assert_eq!(result.meta.geo_mode, GEO_MODE);
    assert_eq!(analyzer.provider().last_image_len(), Some(4));
    assert!(analyzer.provider().last_geo().unwrap().is_global());
}
