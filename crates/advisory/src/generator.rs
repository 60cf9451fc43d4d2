use async_trait::async_trait;

use crate::narrative::{AdvisoryError, AdvisoryNarrative};
use crate::stats::AdvisoryStats;

/// Produces an advisory narrative from aggregate stats.
///
/// Implementations may be remote and slow; callers must treat every error as
/// recoverable.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync + 'static {
    async fn generate(&self, stats: &AdvisoryStats) -> Result<AdvisoryNarrative, AdvisoryError>;
}
