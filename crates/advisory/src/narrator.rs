use std::sync::Arc;

use crate::fallback::RuleBasedNarrator;
use crate::generator::NarrativeGenerator;
use crate::narrative::{AdvisoryError, AdvisoryNarrative};
use crate::stats::AdvisoryStats;

/// Try the configured generator, fall back to the rule-based narrative.
///
/// `narrate` is infallible: the caller always gets a complete narrative.
#[derive(Clone)]
pub struct Narrator {
    primary: Option<Arc<dyn NarrativeGenerator>>,
    fallback: RuleBasedNarrator,
}

impl Narrator {
    pub fn new(primary: Option<Arc<dyn NarrativeGenerator>>) -> Self {
        Self {
            primary,
            fallback: RuleBasedNarrator,
        }
    }

    /// Narrator with no external generator.
    pub fn rule_based() -> Self {
        Self::new(None)
    }

    pub fn has_generator(&self) -> bool {
        self.primary.is_some()
    }

    #[tracing::instrument(name = "advisory.narrate", skip_all, fields(include_ai = include_ai))]
    pub async fn narrate(&self, stats: &AdvisoryStats, include_ai: bool) -> AdvisoryNarrative {
        if include_ai {
            match self.try_primary(stats).await {
                Ok(narrative) => return narrative,
                Err(AdvisoryError::Disabled) => {
                    tracing::debug!("no advisory generator configured");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "advisory generation failed, using rule-based narrative");
                }
            }
        }
        self.fallback.narrative(stats)
    }

    async fn try_primary(&self, stats: &AdvisoryStats) -> Result<AdvisoryNarrative, AdvisoryError> {
        let generator = self.primary.as_ref().ok_or(AdvisoryError::Disabled)?;
        generator.generate(stats).await
    }
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("has_generator", &self.has_generator())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Canned {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Canned {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl NarrativeGenerator for Canned {
        async fn generate(&self, _stats: &AdvisoryStats) -> Result<AdvisoryNarrative, AdvisoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AdvisoryError::Status(503));
            }
            Ok(AdvisoryNarrative {
                tips: vec!["from generator".into()],
                alert: None,
                recommendation: "generated".into(),
            })
        }
    }

    fn stats() -> AdvisoryStats {
        AdvisoryStats {
            avg_income: Decimal::from(5000),
            avg_expense: Decimal::from(4000),
            current_commitment_percentage: Decimal::from(90),
            average_commitment_percentage: Decimal::from(70),
            active_installments: 2,
            recurring_items: 4,
            negative_surplus_months: 0,
            next_months: vec![],
            top_expense_categories: vec![],
        }
    }

    #[tokio::test]
    async fn uses_generator_when_it_succeeds() {
        let generator = Canned::new(false);
        let narrator = Narrator::new(Some(generator.clone()));
        let n = narrator.narrate(&stats(), true).await;
        assert_eq!(n.recommendation, "generated");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_back_when_generator_fails() {
        let narrator = Narrator::new(Some(Canned::new(true)));
        let n = narrator.narrate(&stats(), true).await;
        assert_eq!(n, RuleBasedNarrator.narrative(&stats()));
        assert!(n.alert.is_some());
    }

    #[tokio::test]
    async fn skips_generator_when_ai_not_requested() {
        let generator = Canned::new(false);
        let narrator = Narrator::new(Some(generator.clone()));
        let n = narrator.narrate(&stats(), false).await;
        assert_eq!(n.tips.len(), 3);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn without_generator_returns_rule_based() {
        let n = Narrator::rule_based().narrate(&stats(), true).await;
        assert_eq!(n, RuleBasedNarrator.narrative(&stats()));
    }
}
