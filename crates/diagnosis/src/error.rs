//! Diagnosis error types.

use plant_id::ProviderError;
use thiserror::Error;

/// The provider response broke its contract in a way that cannot be defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// A suggestion that must be read is missing its name or probability.
    #[error("{section} suggestion #{rank} is missing required field '{field}'")]
    MissingField {
        section: &'static str,
        field: &'static str,
        rank: usize,
    },
}

/// Errors that can occur while analyzing an image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The identification call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The identification succeeded but its result could not be normalized.
    #[error("Internal engine error: {0}")]
    Normalize(#[from] NormalizeError),
}

impl AnalysisError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Provider(err) => err.kind(),
            AnalysisError::Normalize(_) => "normalize",
        }
    }
}
