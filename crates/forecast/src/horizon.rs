//! Horizon orchestrator: one [`MonthProjection`] per month, current month first.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_core::{FamilyContext, YearMonth, round_cents, round_percentage};

use crate::commitment::compute_commitment;
use crate::drivers::{Driver, InstallmentDetail, attribute_drivers};
use crate::error::ForecastError;
use crate::history::HistoricalBaseline;
use crate::income::{IncomeSource, resolve_income};
use crate::installments::amortize;
use crate::model::ForecastInputs;
use crate::recurring::evaluate_recurring;
use crate::surplus::estimate_surplus;

pub const DEFAULT_HORIZON: u32 = 12;

const WARNING_ABOVE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const CRITICAL_ABOVE: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Healthy,
    Warning,
    Critical,
}

impl AlertLevel {
    /// `> 80` is critical, `> 60` is warning, anything else is healthy.
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage > CRITICAL_ABOVE {
            Self::Critical
        } else if percentage > WARNING_ABOVE {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

/// Projection for a single month. Money is rounded to cents and the
/// percentage to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    pub month: YearMonth,
    pub label: String,
    pub income_projected: Decimal,
    pub income_source: IncomeSource,
    pub recurring_income: Decimal,
    pub expense_projected: Decimal,
    pub recurring_expense: Decimal,
    pub fixed_recurring_total: Decimal,
    pub credit_card_installments: Decimal,
    pub fixed_commitment_total: Decimal,
    pub fixed_commitment_percentage: Decimal,
    pub projected_surplus: Decimal,
    pub variable_expense_estimate: Decimal,
    pub balance_projected: Decimal,
    pub active_installments: usize,
    pub active_recurring_items: usize,
    pub drivers: Vec<Driver>,
    pub fixed_expenses: Vec<Driver>,
    pub installment_details: Vec<InstallmentDetail>,
}

impl MonthProjection {
    pub fn alert_level(&self) -> AlertLevel {
        AlertLevel::from_percentage(self.fixed_commitment_percentage)
    }
}

/// Flattened view of the first projected month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthSummary {
    pub month: YearMonth,
    pub label: String,
    pub income_projected: Decimal,
    pub fixed_recurring_total: Decimal,
    pub credit_card_installments: Decimal,
    pub fixed_commitment_total: Decimal,
    pub fixed_commitment_percentage: Decimal,
    pub projected_surplus: Decimal,
    pub balance_projected: Decimal,
    pub alert_level: AlertLevel,
}

impl From<&MonthProjection> for CurrentMonthSummary {
    fn from(p: &MonthProjection) -> Self {
        Self {
            month: p.month,
            label: p.label.clone(),
            income_projected: p.income_projected,
            fixed_recurring_total: p.fixed_recurring_total,
            credit_card_installments: p.credit_card_installments,
            fixed_commitment_total: p.fixed_commitment_total,
            fixed_commitment_percentage: p.fixed_commitment_percentage,
            projected_surplus: p.projected_surplus,
            balance_projected: p.balance_projected,
            alert_level: p.alert_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizonProjection {
    pub baseline: HistoricalBaseline,
    pub projections: Vec<MonthProjection>,
    /// `None` only for an empty horizon.
    pub current_month_summary: Option<CurrentMonthSummary>,
}

/// Project `months` consecutive months starting at the month containing `today`.
///
/// The baseline is computed once; every month is then evaluated
/// independently against it.
#[tracing::instrument(
    name = "forecast.project_horizon",
    skip(ctx, inputs),
    fields(family_id = %ctx.family_id())
)]
pub fn project_horizon(
    ctx: &FamilyContext,
    inputs: &ForecastInputs,
    today: NaiveDate,
    months: u32,
) -> Result<HorizonProjection, ForecastError> {
    for installment in &inputs.legacy_installments {
        installment.validate()?;
    }

    let baseline = HistoricalBaseline::from_transactions(&inputs.transactions);
    let start = YearMonth::containing(today);

    let mut projections = Vec::new();
    for offset in 0..months {
        let month = start.plus_months(offset)?;
        projections.push(project_month(inputs, &baseline, month));
    }

    let current_month_summary = projections.first().map(CurrentMonthSummary::from);
    tracing::debug!(
        months = projections.len(),
        avg_income = %baseline.avg_income,
        avg_expense = %baseline.avg_expense,
        "horizon projected"
    );

    Ok(HorizonProjection {
        baseline,
        projections,
        current_month_summary,
    })
}

fn project_month(
    inputs: &ForecastInputs,
    baseline: &HistoricalBaseline,
    month: YearMonth,
) -> MonthProjection {
    let recurring = evaluate_recurring(&inputs.recurring, month, baseline);
    let installments = amortize(
        &inputs.legacy_installments,
        &inputs.planned_installments,
        month,
    );
    let income = resolve_income(&inputs.settings, recurring.income, baseline.avg_income);
    let commitment = compute_commitment(recurring.expense, installments.total, income.amount);
    let surplus = estimate_surplus(income.amount, &commitment, baseline.avg_expense);
    let lists = attribute_drivers(&recurring, &installments);

    MonthProjection {
        month,
        label: month.label(),
        income_projected: round_cents(income.amount),
        income_source: income.source,
        recurring_income: round_cents(recurring.income),
        expense_projected: round_cents(surplus.expense_projected),
        recurring_expense: round_cents(recurring.expense),
        fixed_recurring_total: round_cents(commitment.fixed_recurring_total),
        credit_card_installments: round_cents(commitment.credit_card_installments),
        fixed_commitment_total: round_cents(commitment.total),
        fixed_commitment_percentage: round_percentage(commitment.percentage),
        projected_surplus: round_cents(surplus.projected_surplus),
        variable_expense_estimate: round_cents(surplus.variable_expense_estimate),
        balance_projected: round_cents(surplus.balance_projected),
        active_installments: installments.dues.len(),
        active_recurring_items: recurring.active_items,
        drivers: lists.drivers,
        fixed_expenses: lists.fixed_expenses,
        installment_details: lists.installment_details,
    }
}
