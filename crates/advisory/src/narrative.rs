use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Advisory text attached to a forecast.
///
/// Same shape whether it came from the external generator or the rule-based
/// fallback. `alert` serializes as `null` when there is nothing to flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryNarrative {
    pub tips: Vec<String>,
    #[serde(default)]
    pub alert: Option<String>,
    pub recommendation: String,
}

impl AdvisoryNarrative {
    /// Reject narratives that parse but carry no usable content.
    pub fn validate(self) -> Result<Self, AdvisoryError> {
        if self.tips.is_empty() || self.tips.iter().any(|t| t.trim().is_empty()) {
            return Err(AdvisoryError::Malformed("tips must be non-empty strings".into()));
        }
        if self.recommendation.trim().is_empty() {
            return Err(AdvisoryError::Malformed("recommendation is empty".into()));
        }
        Ok(self)
    }
}

/// Failure of the external generator. Never surfaced to API callers.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory generator is not configured")]
    Disabled,

    #[error("advisory transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("advisory endpoint returned status {0}")]
    Status(u16),

    #[error("advisory response contains no JSON object")]
    MissingJson,

    #[error("malformed advisory response: {0}")]
    Malformed(String),
}
