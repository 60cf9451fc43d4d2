//! Surplus and balance estimates.
//!
//! `projected_surplus` nets income against the fixed commitment only;
//! `balance_projected` nets it against fixed plus estimated variable
//! spending. Both are reported because they answer different questions.

use rust_decimal::Decimal;

use crate::commitment::Commitment;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurplusEstimate {
    /// May be negative.
    pub projected_surplus: Decimal,
    /// Historical expense above the recurring-fixed portion, floored at zero.
    pub variable_expense_estimate: Decimal,
    pub expense_projected: Decimal,
    pub balance_projected: Decimal,
}

pub fn estimate_surplus(
    income_projected: Decimal,
    commitment: &Commitment,
    avg_expense: Decimal,
) -> SurplusEstimate {
    let variable_expense_estimate =
        (avg_expense - commitment.fixed_recurring_total).max(Decimal::ZERO);
    let expense_projected = commitment.total + variable_expense_estimate;
    SurplusEstimate {
        projected_surplus: income_projected - commitment.total,
        variable_expense_estimate,
        expense_projected,
        balance_projected: income_projected - expense_projected,
    }
}
