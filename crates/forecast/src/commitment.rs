//! Fixed commitment: what is already spoken for before any variable spending.

use rust_decimal::Decimal;

use hearth_core::percentage_of;

/// Full-precision commitment figures for one month.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Commitment {
    /// Recurring expenses active in the month.
    pub fixed_recurring_total: Decimal,
    /// Installments due in the month (legacy + grouped).
    pub credit_card_installments: Decimal,
    pub total: Decimal,
    /// `total / income * 100`; zero when income is not positive.
    pub percentage: Decimal,
}

pub fn compute_commitment(
    recurring_expense: Decimal,
    installments: Decimal,
    income_projected: Decimal,
) -> Commitment {
    let total = recurring_expense + installments;
    Commitment {
        fixed_recurring_total: recurring_expense,
        credit_card_installments: installments,
        total,
        percentage: percentage_of(total, income_projected),
    }
}
