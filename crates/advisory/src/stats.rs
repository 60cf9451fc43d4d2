//! Aggregate payload handed to narrative generators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_core::{round_cents, round_percentage};
use hearth_forecast::{HorizonProjection, MonthProjection};

const AVERAGE_WINDOW: usize = 6;
const PREVIEW_MONTHS: usize = 3;
const TOP_CATEGORIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPreview {
    pub month: String,
    pub projected_surplus: Decimal,
    pub commitment_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Aggregate view of a horizon. Contains no identifiers and no individual
/// transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryStats {
    pub avg_income: Decimal,
    pub avg_expense: Decimal,
    /// Commitment percentage of the current month.
    pub current_commitment_percentage: Decimal,
    /// Mean commitment percentage over the first six projected months.
    pub average_commitment_percentage: Decimal,
    pub active_installments: usize,
    pub recurring_items: usize,
    pub negative_surplus_months: usize,
    pub next_months: Vec<MonthPreview>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_expense_categories: Vec<CategoryTotal>,
}

impl AdvisoryStats {
    pub fn from_horizon(horizon: &HorizonProjection) -> Self {
        let current = horizon.projections.first();

        let window: Vec<Decimal> = horizon
            .projections
            .iter()
            .take(AVERAGE_WINDOW)
            .map(|p| p.fixed_commitment_percentage)
            .collect();
        let average_commitment_percentage = if window.is_empty() {
            Decimal::ZERO
        } else {
            round_percentage(window.iter().copied().sum::<Decimal>() / Decimal::from(window.len()))
        };

        Self {
            avg_income: round_cents(horizon.baseline.avg_income),
            avg_expense: round_cents(horizon.baseline.avg_expense),
            current_commitment_percentage: current
                .map_or(Decimal::ZERO, |p| p.fixed_commitment_percentage),
            average_commitment_percentage,
            active_installments: current.map_or(0, |p| p.active_installments),
            recurring_items: current.map_or(0, |p| p.active_recurring_items),
            negative_surplus_months: horizon
                .projections
                .iter()
                .filter(|p| p.projected_surplus < Decimal::ZERO)
                .count(),
            next_months: horizon
                .projections
                .iter()
                .take(PREVIEW_MONTHS)
                .map(MonthPreview::from)
                .collect(),
            top_expense_categories: horizon
                .baseline
                .top_expense_categories(TOP_CATEGORIES)
                .into_iter()
                .map(|(category, total)| CategoryTotal {
                    category,
                    total: round_cents(total),
                })
                .collect(),
        }
    }
}

impl From<&MonthProjection> for MonthPreview {
    fn from(p: &MonthProjection) -> Self {
        Self {
            month: p.label.clone(),
            projected_surplus: p.projected_surplus,
            commitment_percentage: p.fixed_commitment_percentage,
        }
    }
}
