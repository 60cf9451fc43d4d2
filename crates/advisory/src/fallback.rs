//! Deterministic narrative used whenever the external generator is off or fails.

use async_trait::async_trait;

use hearth_forecast::AlertLevel;

use crate::generator::NarrativeGenerator;
use crate::narrative::{AdvisoryError, AdvisoryNarrative};
use crate::stats::AdvisoryStats;

const TIPS: [&str; 3] = [
    "Review recurring subscriptions and cancel the ones you no longer use.",
    "Avoid starting new installment plans until current ones are paid off.",
    "Set aside part of every month's surplus as an emergency reserve.",
];

const RECOMMENDATION: &str =
    "Keep fixed commitments below 60% of your income to leave room for variable expenses.";

/// Rule-based narrator. Same stats, same narrative.
#[derive(Debug, Copy, Clone, Default)]
pub struct RuleBasedNarrator;

impl RuleBasedNarrator {
    /// The alert reflects the current month only, never the window average.
    pub fn narrative(&self, stats: &AdvisoryStats) -> AdvisoryNarrative {
        let pct = stats.current_commitment_percentage;
        let alert = match AlertLevel::from_percentage(pct) {
            AlertLevel::Critical => Some(format!(
                "Fixed commitments take {pct}% of this month's income. There is little room for anything else."
            )),
            AlertLevel::Warning => Some(format!(
                "Fixed commitments take {pct}% of this month's income. Watch new recurring costs."
            )),
            AlertLevel::Healthy => None,
        };

        AdvisoryNarrative {
            tips: TIPS.iter().map(|t| t.to_string()).collect(),
            alert,
            recommendation: RECOMMENDATION.to_string(),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for RuleBasedNarrator {
    async fn generate(&self, stats: &AdvisoryStats) -> Result<AdvisoryNarrative, AdvisoryError> {
        Ok(self.narrative(stats))
    }
}
