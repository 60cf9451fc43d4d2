//! Explainability lists: "what is driving this month's number".
//!
//! Entries are kept in discovery order (recurring incomes, recurring
//! expenses, legacy installments, grouped installments) and truncated at
//! fixed caps. Nothing is re-sorted; UI parity depends on that order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_core::round_cents;

use crate::installments::{InstallmentContribution, InstallmentDue, InstallmentOrigin};
use crate::recurring::RecurringContribution;

pub const DRIVER_CAP: usize = 8;
pub const FIXED_EXPENSE_CAP: usize = 10;
pub const INSTALLMENT_DETAIL_CAP: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    RecurringIncome,
    RecurringExpense,
    Installment,
}

/// A single named contributor to a projected figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub label: String,
    pub amount: Decimal,
    pub kind: DriverKind,
}

impl Driver {
    pub fn new(label: impl Into<String>, amount: Decimal, kind: DriverKind) -> Self {
        Self {
            label: label.into(),
            amount,
            kind,
        }
    }

    fn rounded(self) -> Self {
        Self {
            amount: round_cents(self.amount),
            ..self
        }
    }
}

/// Installment line item for the commitment breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentDetail {
    pub label: String,
    pub amount: Decimal,
    pub number: u32,
    /// Absent when a grouped installment lost its group row.
    pub total: Option<u32>,
    pub source: InstallmentOrigin,
}

impl From<&InstallmentDue> for InstallmentDetail {
    fn from(due: &InstallmentDue) -> Self {
        Self {
            label: due.label.clone(),
            amount: round_cents(due.amount),
            number: due.number,
            total: due.total,
            source: due.origin,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLists {
    pub drivers: Vec<Driver>,
    pub fixed_expenses: Vec<Driver>,
    pub installment_details: Vec<InstallmentDetail>,
}

/// Merge one month's contributions into the three capped lists.
pub fn attribute_drivers(
    recurring: &RecurringContribution,
    installments: &InstallmentContribution,
) -> DriverLists {
    let drivers = recurring
        .income_drivers
        .iter()
        .chain(&recurring.expense_drivers)
        .cloned()
        .chain(installments.dues.iter().map(InstallmentDue::driver))
        .take(DRIVER_CAP)
        .map(Driver::rounded)
        .collect();

    let fixed_expenses = recurring
        .fixed_expenses
        .iter()
        .take(FIXED_EXPENSE_CAP)
        .cloned()
        .map(Driver::rounded)
        .collect();

    let installment_details = installments
        .dues
        .iter()
        .take(INSTALLMENT_DETAIL_CAP)
        .map(InstallmentDetail::from)
        .collect();

    DriverLists {
        drivers,
        fixed_expenses,
        installment_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(label: &str, origin: InstallmentOrigin) -> InstallmentDue {
        InstallmentDue {
            label: label.to_string(),
            amount: Decimal::from(100),
            number: 1,
            total: Some(10),
            origin,
        }
    }

    fn expense(label: &str) -> Driver {
        Driver::new(label, Decimal::from(50), DriverKind::RecurringExpense)
    }

    #[test]
    fn preserves_discovery_order_across_sources() {
        let recurring = RecurringContribution {
            income_drivers: vec![Driver::new("Salary", Decimal::from(5000), DriverKind::RecurringIncome)],
            expense_drivers: vec![expense("Rent")],
            fixed_expenses: vec![expense("Rent")],
            ..Default::default()
        };
        let installments = InstallmentContribution {
            total: Decimal::from(200),
            dues: vec![due("Sofa (1/10)", InstallmentOrigin::Legacy), due("Phone (1/10)", InstallmentOrigin::Grouped)],
        };

        let lists = attribute_drivers(&recurring, &installments);
        let labels: Vec<&str> = lists.drivers.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Salary", "Rent", "Sofa (1/10)", "Phone (1/10)"]);
        assert_eq!(lists.drivers[2].kind, DriverKind::Installment);
        assert_eq!(lists.installment_details[1].source, InstallmentOrigin::Grouped);
    }

    #[test]
    fn truncates_each_list_at_its_cap() {
        let expenses: Vec<Driver> = (0..12).map(|i| expense(&format!("E{i}"))).collect();
        let recurring = RecurringContribution {
            expense_drivers: expenses.clone(),
            fixed_expenses: expenses,
            ..Default::default()
        };
        let installments = InstallmentContribution {
            total: Decimal::from(1200),
            dues: (0..12).map(|i| due(&format!("I{i}"), InstallmentOrigin::Legacy)).collect(),
        };

        let lists = attribute_drivers(&recurring, &installments);
        assert_eq!(lists.drivers.len(), DRIVER_CAP);
        assert_eq!(lists.drivers.last().unwrap().label, "E7");
        assert_eq!(lists.fixed_expenses.len(), FIXED_EXPENSE_CAP);
        assert_eq!(lists.fixed_expenses.last().unwrap().label, "E9");
        assert_eq!(lists.installment_details.len(), INSTALLMENT_DETAIL_CAP);
        assert_eq!(lists.installment_details.last().unwrap().label, "I9");
    }

    #[test]
    fn rounds_amounts_at_assembly() {
        let recurring = RecurringContribution {
            fixed_expenses: vec![Driver::new("Gym", "89.905".parse().unwrap(), DriverKind::RecurringExpense)],
            ..Default::default()
        };
        let lists = attribute_drivers(&recurring, &InstallmentContribution::default());
        assert_eq!(lists.fixed_expenses[0].amount, "89.91".parse::<Decimal>().unwrap());
    }
}
