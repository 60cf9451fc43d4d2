use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use hearth_core::{FamilyContext, FamilyId, UserId};
use hearth_forecast::{
    FamilySettings, ForecastInputs, InstallmentStatus, LegacyInstallment, PlannedInstallment,
    RecurringDefinition, Transaction,
};

use super::{ForecastSource, SourceError};

/// In-memory family store for tests/dev.
///
/// Each family holds a full [`ForecastInputs`]; reads apply the same filters
/// the database queries do. Legacy installments carry no active flag, so the
/// seeded list is taken as the active set.
#[derive(Debug, Default)]
pub struct InMemoryForecastSource {
    memberships: RwLock<HashMap<UserId, FamilyId>>,
    families: RwLock<HashMap<FamilyId, ForecastInputs>>,
}

impl InMemoryForecastSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, user_id: UserId, family_id: FamilyId) {
        if let Ok(mut map) = self.memberships.write() {
            map.insert(user_id, family_id);
        }
    }

    /// Replace everything stored for `family_id`.
    pub fn put_family(&self, family_id: FamilyId, inputs: ForecastInputs) {
        if let Ok(mut map) = self.families.write() {
            map.insert(family_id, inputs);
        }
    }

    fn with_family<T>(
        &self,
        ctx: &FamilyContext,
        read: impl FnOnce(&ForecastInputs) -> T,
    ) -> Result<T, SourceError>
    where
        T: Default,
    {
        let map = self
            .families
            .read()
            .map_err(|_| SourceError::Unavailable("family store lock poisoned".into()))?;
        Ok(map.get(&ctx.family_id()).map(read).unwrap_or_default())
    }
}

#[async_trait]
impl ForecastSource for InMemoryForecastSource {
    async fn resolve_family(&self, user_id: UserId) -> Result<Option<FamilyContext>, SourceError> {
        let map = self
            .memberships
            .read()
            .map_err(|_| SourceError::Unavailable("membership lock poisoned".into()))?;
        Ok(map
            .get(&user_id)
            .map(|family_id| FamilyContext::new(*family_id, user_id)))
    }

    async fn transactions(
        &self,
        ctx: &FamilyContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>, SourceError> {
        self.with_family(ctx, |f| {
            f.transactions
                .iter()
                .filter(|t| t.date >= from && t.date <= to)
                .cloned()
                .collect()
        })
    }

    async fn recurring_definitions(
        &self,
        ctx: &FamilyContext,
    ) -> Result<Vec<RecurringDefinition>, SourceError> {
        self.with_family(ctx, |f| {
            f.recurring.iter().filter(|r| r.active).cloned().collect()
        })
    }

    async fn legacy_installments(
        &self,
        ctx: &FamilyContext,
    ) -> Result<Vec<LegacyInstallment>, SourceError> {
        self.with_family(ctx, |f| f.legacy_installments.clone())
    }

    async fn planned_installments(
        &self,
        ctx: &FamilyContext,
        from: NaiveDate,
    ) -> Result<Vec<PlannedInstallment>, SourceError> {
        self.with_family(ctx, |f| {
            f.planned_installments
                .iter()
                .filter(|p| p.status == InstallmentStatus::Planned && p.due_date >= from)
                .cloned()
                .collect()
        })
    }

    async fn family_settings(&self, ctx: &FamilyContext) -> Result<FamilySettings, SourceError> {
        self.with_family(ctx, |f| f.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::load_inputs;
    use hearth_forecast::{IncomeType, TransactionKind};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            kind: TransactionKind::Expense,
            amount: Decimal::from(10),
            category_id: None,
            date: date(y, m, d),
        }
    }

    fn planned(due: NaiveDate, status: InstallmentStatus) -> PlannedInstallment {
        PlannedInstallment {
            group: None,
            due_date: due,
            installment_index: 1,
            amount: Decimal::from(50),
            status,
        }
    }

    fn seeded() -> (InMemoryForecastSource, FamilyContext) {
        let source = InMemoryForecastSource::new();
        let user = UserId::new();
        let family = FamilyId::new();
        source.add_member(user, family);
        source.put_family(
            family,
            ForecastInputs {
                transactions: vec![tx(2025, 3, 31), tx(2025, 4, 1), tx(2025, 6, 15), tx(2025, 6, 16)],
                recurring: vec![
                    RecurringDefinition {
                        description: "Gym".into(),
                        kind: TransactionKind::Expense,
                        amount: Decimal::from(90),
                        category_id: None,
                        subcategory_id: None,
                        start_date: date(2025, 1, 1),
                        end_date: None,
                        active: false,
                    },
                ],
                planned_installments: vec![
                    planned(date(2025, 5, 30), InstallmentStatus::Planned),
                    planned(date(2025, 6, 1), InstallmentStatus::Planned),
                    planned(date(2025, 7, 1), InstallmentStatus::Paid),
                ],
                settings: FamilySettings {
                    income_anchor_value: Some(Decimal::from(4000)),
                    income_type: Some(IncomeType::Fixed),
                    accounting_regime: Some("accrual".into()),
                },
                ..Default::default()
            },
        );
        (source, FamilyContext::new(family, user))
    }

    #[tokio::test]
    async fn resolves_member_to_family() {
        let (source, ctx) = seeded();
        let resolved = source.resolve_family(ctx.user_id()).await.unwrap();
        assert_eq!(resolved, Some(ctx));
    }

    #[tokio::test]
    async fn unknown_user_has_no_family() {
        let source = InMemoryForecastSource::new();
        assert!(source.resolve_family(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn load_inputs_applies_windows_and_filters() {
        let (source, ctx) = seeded();

        let inputs = load_inputs(&source, &ctx, date(2025, 6, 15), 3).await.unwrap();

        // April 1 .. June 15 inclusive.
        let dates: Vec<NaiveDate> = inputs.transactions.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2025, 4, 1), date(2025, 6, 15)]);
        assert!(inputs.recurring.is_empty());
        assert_eq!(inputs.planned_installments.len(), 1);
        assert_eq!(inputs.planned_installments[0].due_date, date(2025, 6, 1));
        assert_eq!(inputs.settings.accounting_regime.as_deref(), Some("accrual"));
    }

    #[tokio::test]
    async fn other_families_are_invisible() {
        let (source, _) = seeded();
        let stranger = FamilyContext::new(FamilyId::new(), UserId::new());

        let inputs = load_inputs(&source, &stranger, date(2025, 6, 15), 3).await.unwrap();
        assert_eq!(inputs, ForecastInputs::default());
    }
}
