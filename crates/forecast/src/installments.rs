//! Installment amortizer.
//!
//! Two schedule shapes feed the same question ("what is due in month M?"):
//!
//! - [`LegacyInstallment`]: a running counter. The number due in M is
//!   `current_installment + months_since(start_date)`, and it counts only
//!   while that number stays within `[current_installment, total_installments]`.
//! - [`PlannedInstallment`]: an explicit due date. It counts in exactly the
//!   month containing `due_date`.
//!
//! Both are summed with no cross-check. An obligation entered in both tables
//! is counted twice; the write side owns that deduplication.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_core::YearMonth;

use crate::drivers::{Driver, DriverKind};
use crate::model::{InstallmentStatus, LegacyInstallment, PlannedInstallment};

const MISSING_GROUP_LABEL: &str = "Parcela";
const MISSING_GROUP_TOTAL: &str = "?";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentOrigin {
    Legacy,
    Grouped,
}

/// One installment payment falling in a month.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentDue {
    pub label: String,
    pub amount: Decimal,
    pub number: u32,
    pub total: Option<u32>,
    pub origin: InstallmentOrigin,
}

impl InstallmentDue {
    pub fn driver(&self) -> Driver {
        Driver::new(self.label.clone(), self.amount, DriverKind::Installment)
    }
}

/// Anything that can say what it contributes to a given month.
pub trait InstallmentSource {
    fn due_in(&self, month: YearMonth) -> Option<InstallmentDue>;
}

impl InstallmentSource for LegacyInstallment {
    fn due_in(&self, month: YearMonth) -> Option<InstallmentDue> {
        let number = i64::from(self.current_installment) + month.months_since(self.start_date);
        let in_window = number >= i64::from(self.current_installment)
            && number <= i64::from(self.total_installments);
        if !in_window {
            return None;
        }
        let number = u32::try_from(number).ok()?;
        Some(InstallmentDue {
            label: format!("{} ({}/{})", self.description, number, self.total_installments),
            amount: self.installment_amount,
            number,
            total: Some(self.total_installments),
            origin: InstallmentOrigin::Legacy,
        })
    }
}

impl InstallmentSource for PlannedInstallment {
    fn due_in(&self, month: YearMonth) -> Option<InstallmentDue> {
        if self.status != InstallmentStatus::Planned || !month.contains(self.due_date) {
            return None;
        }
        let (description, total) = match &self.group {
            Some(group) => (group.description.as_str(), Some(group.installments_total)),
            None => (MISSING_GROUP_LABEL, None),
        };
        let total_label = total.map_or_else(|| MISSING_GROUP_TOTAL.to_string(), |t| t.to_string());
        Some(InstallmentDue {
            label: format!("{} ({}/{})", description, self.installment_index, total_label),
            amount: self.amount,
            number: self.installment_index,
            total,
            origin: InstallmentOrigin::Grouped,
        })
    }
}

/// Installments due in one month, legacy first, then grouped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallmentContribution {
    pub total: Decimal,
    pub dues: Vec<InstallmentDue>,
}

pub fn amortize(
    legacy: &[LegacyInstallment],
    grouped: &[PlannedInstallment],
    month: YearMonth,
) -> InstallmentContribution {
    let dues: Vec<InstallmentDue> = legacy
        .iter()
        .filter_map(|i| i.due_in(month))
        .chain(grouped.iter().filter_map(|i| i.due_in(month)))
        .collect();
    let total = dues.iter().map(|d| d.amount).sum();
    InstallmentContribution { total, dues }
}
