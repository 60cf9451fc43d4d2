//! Postgres-backed forecast source.
//!
//! Reads the tables owned by the CRUD side of the product. Nothing here
//! writes. Every query filters on `family_id`.
//!
//! ## Tables read
//!
//! | Table | Columns used |
//! |-------|--------------|
//! | `family_members` | `user_id`, `family_id`, `is_active`, `created_at` |
//! | `transactions` | `family_id`, `type`, `amount`, `category_id`, `date` |
//! | `recurring_transactions` | `family_id`, `description`, `type`, `amount`, `category_id`, `subcategory_id`, `start_date`, `end_date`, `is_active`, `created_at` |
//! | `installments` | `family_id`, `description`, `category_id`, `start_date`, `current_installment`, `total_installments`, `installment_amount`, `is_active`, `created_at` |
//! | `installment_groups` | `id`, `family_id`, `description`, `category_id`, `subcategory_id`, `installments_total`, `source` |
//! | `installment_schedule` | `family_id`, `group_id`, `due_date`, `installment_index`, `amount`, `status` |
//! | `family_settings` | `family_id`, `income_anchor_value`, `income_type`, `accounting_regime` |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use hearth_core::{FamilyContext, FamilyId, UserId};
use hearth_forecast::{
    FamilySettings, IncomeType, InstallmentGroup, InstallmentStatus, LegacyInstallment,
    PlannedInstallment, RecurringDefinition, Transaction, TransactionKind,
};

use super::{ForecastSource, SourceError};

#[derive(Debug, Clone)]
pub struct PostgresForecastSource {
    pool: Arc<PgPool>,
}

impl PostgresForecastSource {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn connect(database_url: &str) -> Result<Self, SourceError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ForecastSource for PostgresForecastSource {
    #[instrument(skip(self, user_id), fields(user_id = %user_id), err)]
    async fn resolve_family(&self, user_id: UserId) -> Result<Option<FamilyContext>, SourceError> {
        let row = sqlx::query(
            r#"
            SELECT family_id
            FROM family_members
            WHERE user_id = $1 AND is_active = true
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await?;

        row.map(|row| -> Result<FamilyContext, SourceError> {
            let family_id: Uuid = row.try_get("family_id")?;
            Ok(FamilyContext::new(FamilyId::from_uuid(family_id), user_id))
        })
        .transpose()
    }

    #[instrument(skip(self, ctx), fields(family_id = %ctx.family_id()), err)]
    async fn transactions(
        &self,
        ctx: &FamilyContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>, SourceError> {
        let rows = sqlx::query(
            r#"
            SELECT type, amount, category_id::text AS category_id, date
            FROM transactions
            WHERE family_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            "#,
        )
        .bind(ctx.family_id().as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<Transaction, SourceError> {
                Ok(Transaction {
                    kind: kind(row)?,
                    amount: row.try_get("amount")?,
                    category_id: row.try_get("category_id")?,
                    date: row.try_get("date")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self, ctx), fields(family_id = %ctx.family_id()), err)]
    async fn recurring_definitions(
        &self,
        ctx: &FamilyContext,
    ) -> Result<Vec<RecurringDefinition>, SourceError> {
        let rows = sqlx::query(
            r#"
            SELECT
                description,
                type,
                amount,
                category_id::text AS category_id,
                subcategory_id::text AS subcategory_id,
                start_date,
                end_date,
                is_active
            FROM recurring_transactions
            WHERE family_id = $1 AND is_active = true
            ORDER BY created_at ASC
            "#,
        )
        .bind(ctx.family_id().as_uuid())
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<RecurringDefinition, SourceError> {
                Ok(RecurringDefinition {
                    description: row.try_get("description")?,
                    kind: kind(row)?,
                    amount: row.try_get("amount")?,
                    category_id: row.try_get("category_id")?,
                    subcategory_id: row.try_get("subcategory_id")?,
                    start_date: row.try_get("start_date")?,
                    end_date: row.try_get("end_date")?,
                    active: row.try_get("is_active")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self, ctx), fields(family_id = %ctx.family_id()), err)]
    async fn legacy_installments(
        &self,
        ctx: &FamilyContext,
    ) -> Result<Vec<LegacyInstallment>, SourceError> {
        let rows = sqlx::query(
            r#"
            SELECT
                description,
                category_id::text AS category_id,
                start_date,
                current_installment,
                total_installments,
                installment_amount
            FROM installments
            WHERE family_id = $1 AND is_active = true
            ORDER BY created_at ASC
            "#,
        )
        .bind(ctx.family_id().as_uuid())
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<LegacyInstallment, SourceError> {
                Ok(LegacyInstallment {
                    description: row.try_get("description")?,
                    category_id: row.try_get("category_id")?,
                    start_date: row.try_get("start_date")?,
                    current_installment: count(row, "current_installment")?,
                    total_installments: count(row, "total_installments")?,
                    installment_amount: row.try_get("installment_amount")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self, ctx), fields(family_id = %ctx.family_id()), err)]
    async fn planned_installments(
        &self,
        ctx: &FamilyContext,
        from: NaiveDate,
    ) -> Result<Vec<PlannedInstallment>, SourceError> {
        // LEFT JOIN: a schedule row whose group is gone still counts.
        let rows = sqlx::query(
            r#"
            SELECT
                s.due_date,
                s.installment_index,
                s.amount,
                s.status,
                g.id AS group_id,
                g.description AS group_description,
                g.category_id::text AS group_category_id,
                g.subcategory_id::text AS group_subcategory_id,
                g.installments_total AS group_installments_total,
                g.source AS group_source
            FROM installment_schedule s
            LEFT JOIN installment_groups g
                ON g.id = s.group_id AND g.family_id = s.family_id
            WHERE s.family_id = $1 AND s.status = 'PLANNED' AND s.due_date >= $2
            ORDER BY s.due_date ASC, s.installment_index ASC
            "#,
        )
        .bind(ctx.family_id().as_uuid())
        .bind(from)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<PlannedInstallment, SourceError> {
                Ok(PlannedInstallment {
                    group: group(row)?,
                    due_date: row.try_get("due_date")?,
                    installment_index: count(row, "installment_index")?,
                    amount: row.try_get("amount")?,
                    status: status(row)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self, ctx), fields(family_id = %ctx.family_id()), err)]
    async fn family_settings(&self, ctx: &FamilyContext) -> Result<FamilySettings, SourceError> {
        let row = sqlx::query(
            r#"
            SELECT income_anchor_value, income_type, accounting_regime
            FROM family_settings
            WHERE family_id = $1
            "#,
        )
        .bind(ctx.family_id().as_uuid())
        .fetch_optional(&*self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(FamilySettings::default());
        };

        let income_type = row
            .try_get::<Option<String>, _>("income_type")?
            .map(|raw| match raw.as_str() {
                "fixed" => Ok(IncomeType::Fixed),
                "variable" => Ok(IncomeType::Variable),
                other => Err(SourceError::decode("income_type", other)),
            })
            .transpose()?;

        Ok(FamilySettings {
            income_anchor_value: row.try_get::<Option<Decimal>, _>("income_anchor_value")?,
            income_type,
            accounting_regime: row.try_get("accounting_regime")?,
        })
    }
}

fn kind(row: &PgRow) -> Result<TransactionKind, SourceError> {
    let raw: String = row.try_get("type")?;
    match raw.as_str() {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        other => Err(SourceError::decode("transaction type", other)),
    }
}

fn status(row: &PgRow) -> Result<InstallmentStatus, SourceError> {
    let raw: String = row.try_get("status")?;
    match raw.as_str() {
        "PLANNED" => Ok(InstallmentStatus::Planned),
        "PAID" => Ok(InstallmentStatus::Paid),
        "CANCELLED" => Ok(InstallmentStatus::Cancelled),
        other => Err(SourceError::decode("installment status", other)),
    }
}

/// Non-negative INTEGER column as `u32`.
fn count(row: &PgRow, column: &'static str) -> Result<u32, SourceError> {
    let raw: i32 = row.try_get(column)?;
    u32::try_from(raw).map_err(|e| SourceError::decode(column, e))
}

fn group(row: &PgRow) -> Result<Option<InstallmentGroup>, SourceError> {
    let id: Option<Uuid> = row.try_get("group_id")?;
    if id.is_none() {
        return Ok(None);
    }
    let total: i32 = row.try_get("group_installments_total")?;
    Ok(Some(InstallmentGroup {
        description: row.try_get("group_description")?,
        category_id: row.try_get("group_category_id")?,
        subcategory_id: row.try_get("group_subcategory_id")?,
        installments_total: u32::try_from(total)
            .map_err(|e| SourceError::decode("installments_total", e))?,
        source: row.try_get("group_source")?,
    }))
}
