//! Family-scoped, read-only access to the engine's inputs.
//!
//! Every read takes the resolved [`FamilyContext`] explicitly. Implementations
//! must filter on its family id; nothing here falls back to ambient state.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryForecastSource;
pub use postgres::PostgresForecastSource;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use hearth_core::{DomainError, FamilyContext, UserId, YearMonth};
use hearth_forecast::{
    FamilySettings, ForecastInputs, LegacyInstallment, PlannedInstallment, RecurringDefinition,
    Transaction,
};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to decode {what}: {detail}")]
    Decode { what: &'static str, detail: String },

    #[error("invalid history window: {0}")]
    Window(#[from] DomainError),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub(crate) fn decode(what: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Decode {
            what,
            detail: detail.to_string(),
        }
    }
}

#[async_trait]
pub trait ForecastSource: Send + Sync + 'static {
    /// The family the user currently belongs to, if any.
    async fn resolve_family(&self, user_id: UserId) -> Result<Option<FamilyContext>, SourceError>;

    /// Transactions dated within `[from, to]`.
    async fn transactions(
        &self,
        ctx: &FamilyContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>, SourceError>;

    /// Active recurring definitions.
    async fn recurring_definitions(
        &self,
        ctx: &FamilyContext,
    ) -> Result<Vec<RecurringDefinition>, SourceError>;

    /// Active legacy installments.
    async fn legacy_installments(
        &self,
        ctx: &FamilyContext,
    ) -> Result<Vec<LegacyInstallment>, SourceError>;

    /// `PLANNED` grouped installments due on or after `from`, with their group
    /// joined when it exists.
    async fn planned_installments(
        &self,
        ctx: &FamilyContext,
        from: NaiveDate,
    ) -> Result<Vec<PlannedInstallment>, SourceError>;

    /// Settings row, or defaults when the family never saved one.
    async fn family_settings(&self, ctx: &FamilyContext) -> Result<FamilySettings, SourceError>;
}

/// Load everything one projection needs.
///
/// History covers `history_months` calendar months ending with the month
/// containing `today` (up to `today` itself). Grouped installments are read
/// from the first day of the current month so that rows due earlier this
/// month still count.
#[tracing::instrument(
    name = "infra.load_inputs",
    skip(source, ctx),
    fields(family_id = %ctx.family_id()),
    err
)]
pub async fn load_inputs(
    source: &dyn ForecastSource,
    ctx: &FamilyContext,
    today: NaiveDate,
    history_months: u32,
) -> Result<ForecastInputs, SourceError> {
    let current = YearMonth::containing(today);
    let history_start = current.minus_months(history_months.saturating_sub(1))?.first_day();

    let (transactions, recurring, legacy_installments, planned_installments, settings) = tokio::try_join!(
        source.transactions(ctx, history_start, today),
        source.recurring_definitions(ctx),
        source.legacy_installments(ctx),
        source.planned_installments(ctx, current.first_day()),
        source.family_settings(ctx),
    )?;

    tracing::debug!(
        transactions = transactions.len(),
        recurring = recurring.len(),
        legacy = legacy_installments.len(),
        planned = planned_installments.len(),
        "forecast inputs loaded"
    );

    Ok(ForecastInputs {
        transactions,
        recurring,
        legacy_installments,
        planned_installments,
        settings,
    })
}
