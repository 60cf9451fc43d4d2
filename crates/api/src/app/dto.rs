use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hearth_advisory::AdvisoryNarrative;
use hearth_forecast::{CurrentMonthSummary, MonthProjection};

pub const DEFAULT_ACCOUNTING_REGIME: &str = "cash";

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub months: Option<u32>,
    pub include_ai_tips: Option<bool>,
}

impl ForecastRequest {
    /// An empty body means "all defaults".
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetadata {
    pub generated_at: DateTime<Utc>,
    pub months_projected: usize,
    pub historical_months: u32,
    pub accounting_regime: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub projections: Vec<MonthProjection>,
    pub current_month_summary: Option<CurrentMonthSummary>,
    pub ai_tips: AdvisoryNarrative,
    pub metadata: ForecastMetadata,
}
