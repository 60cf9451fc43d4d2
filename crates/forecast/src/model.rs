//! Read-only inputs to the projection engine.
//!
//! These mirror the upstream tables the engine consumes. None of them is
//! mutated or persisted here; the CRUD layer owns their lifecycle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_core::YearMonth;

use crate::error::ForecastError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A historical transaction, used only in aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Non-negative; the direction is carried by `kind`.
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub date: NaiveDate,
}

/// A recurring income or expense stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDefinition {
    pub description: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

impl RecurringDefinition {
    /// `start_date <= last_day(M)` and (`end_date` is open or `end_date >= first_day(M)`).
    pub fn is_active_in(&self, month: YearMonth) -> bool {
        self.start_date <= month.last_day()
            && self.end_date.is_none_or(|end| end >= month.first_day())
    }
}

/// Flat installment schedule keyed by a running counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyInstallment {
    pub description: String,
    pub category_id: Option<String>,
    pub start_date: NaiveDate,
    /// Installment number as of `start_date`'s month.
    pub current_installment: u32,
    pub total_installments: u32,
    pub installment_amount: Decimal,
}

impl LegacyInstallment {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.current_installment >= 1 && self.total_installments >= self.current_installment {
            Ok(())
        } else {
            Err(ForecastError::InvalidInstallment {
                description: self.description.clone(),
                current: self.current_installment,
                total: self.total_installments,
            })
        }
    }
}

/// Header of a grouped installment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentGroup {
    pub description: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub installments_total: u32,
    pub source: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Planned,
    Paid,
    Cancelled,
}

/// One row of a grouped schedule, due on an explicit date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedInstallment {
    /// Missing when the group row could not be joined.
    pub group: Option<InstallmentGroup>,
    pub due_date: NaiveDate,
    pub installment_index: u32,
    pub amount: Decimal,
    pub status: InstallmentStatus,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilySettings {
    pub income_anchor_value: Option<Decimal>,
    pub income_type: Option<IncomeType>,
    pub accounting_regime: Option<String>,
}

impl FamilySettings {
    /// The anchor income, when the family declared a fixed income.
    pub fn fixed_anchor(&self) -> Option<Decimal> {
        match self.income_type {
            Some(IncomeType::Fixed) => self.income_anchor_value,
            _ => None,
        }
    }
}

/// Everything the engine reads for one family, loaded once per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastInputs {
    /// Transactions inside the trailing history window.
    pub transactions: Vec<Transaction>,
    pub recurring: Vec<RecurringDefinition>,
    pub legacy_installments: Vec<LegacyInstallment>,
    pub planned_installments: Vec<PlannedInstallment>,
    pub settings: FamilySettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn def(start: NaiveDate, end: Option<NaiveDate>) -> RecurringDefinition {
        RecurringDefinition {
            description: "Rent".into(),
            kind: TransactionKind::Expense,
            amount: Decimal::from(1000),
            category_id: None,
            subcategory_id: None,
            start_date: start,
            end_date: end,
            active: true,
        }
    }

    #[test]
    fn activity_window_is_inclusive_on_month_boundaries() {
        let jun = YearMonth::new(2025, 6).unwrap();

        // Starts on the last day of the month: active.
        assert!(def(date(2025, 6, 30), None).is_active_in(jun));
        // Starts next month: inactive.
        assert!(!def(date(2025, 7, 1), None).is_active_in(jun));
        // Ends on the first day of the month: active.
        assert!(def(date(2024, 1, 1), Some(date(2025, 6, 1))).is_active_in(jun));
        // Ended the previous month: inactive.
        assert!(!def(date(2024, 1, 1), Some(date(2025, 5, 31))).is_active_in(jun));
    }

    #[test]
    fn anchor_only_applies_to_fixed_income() {
        let mut settings = FamilySettings {
            income_anchor_value: Some(Decimal::from(7000)),
            income_type: Some(IncomeType::Variable),
            accounting_regime: None,
        };
        assert_eq!(settings.fixed_anchor(), None);

        settings.income_type = Some(IncomeType::Fixed);
        assert_eq!(settings.fixed_anchor(), Some(Decimal::from(7000)));

        settings.income_anchor_value = None;
        assert_eq!(settings.fixed_anchor(), None);
    }

    #[test]
    fn legacy_installment_invariant() {
        let mut inst = LegacyInstallment {
            description: "TV".into(),
            category_id: None,
            start_date: date(2025, 1, 1),
            current_installment: 3,
            total_installments: 5,
            installment_amount: Decimal::from(150),
        };
        assert!(inst.validate().is_ok());

        inst.current_installment = 0;
        assert!(inst.validate().is_err());

        inst.current_installment = 6;
        assert!(inst.validate().is_err());
    }

    #[test]
    fn status_uses_upstream_spelling() {
        let json = serde_json::to_string(&InstallmentStatus::Planned).unwrap();
        assert_eq!(json, "\"PLANNED\"");
    }
}
