//! Outbound request body.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;

/// Optional location bias for identification.
///
/// Coordinates are only sent when both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoHint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoHint {
    /// No location bias: the provider searches globally.
    pub fn none() -> Self {
        Self::default()
    }

    /// A hint with both coordinates set.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Returns the coordinate pair if both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn is_global(&self) -> bool {
        self.coordinates().is_none()
    }
}

/// JSON body posted to the identification endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IdentificationRequest {
    pub images: Vec<String>,
    pub health: &'static str,
    pub similar_images: bool,
    pub classification_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl IdentificationRequest {
    /// Builds the fixed request: full health assessment, similar images and
    /// species-level classification for a single image.
    pub fn new(image: &[u8], geo: GeoHint) -> Self {
        let (latitude, longitude) = match geo.coordinates() {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };

        Self {
            images: vec![STANDARD.encode(image)],
            health: "all",
            similar_images: true,
            classification_level: "species",
            latitude,
            longitude,
        }
    }
}
