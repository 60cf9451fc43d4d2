//! Recurring evaluator: which recurring streams hit a month, and for how much.

use rust_decimal::Decimal;

use hearth_core::YearMonth;

use crate::drivers::{Driver, DriverKind};
use crate::history::HistoricalBaseline;
use crate::model::{RecurringDefinition, TransactionKind};

/// Percent of the historical average an item must reach to be listed as a
/// top-line driver. Income and expense use different thresholds.
const INCOME_DRIVER_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
const EXPENSE_DRIVER_PCT: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Recurring totals for one month, split by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurringContribution {
    pub income: Decimal,
    pub expense: Decimal,
    pub active_items: usize,
    /// Incomes reaching 5% of the average income.
    pub income_drivers: Vec<Driver>,
    /// Expenses reaching 3% of the average expense.
    pub expense_drivers: Vec<Driver>,
    /// Every active recurring expense, significant or not.
    pub fixed_expenses: Vec<Driver>,
}

pub fn evaluate_recurring(
    definitions: &[RecurringDefinition],
    month: YearMonth,
    baseline: &HistoricalBaseline,
) -> RecurringContribution {
    let income_threshold = baseline.avg_income * INCOME_DRIVER_PCT;
    let expense_threshold = baseline.avg_expense * EXPENSE_DRIVER_PCT;

    let mut out = RecurringContribution::default();
    for def in definitions.iter().filter(|d| d.is_active_in(month)) {
        out.active_items += 1;
        match def.kind {
            TransactionKind::Income => {
                out.income += def.amount;
                if def.amount >= income_threshold {
                    out.income_drivers.push(Driver::new(
                        def.description.clone(),
                        def.amount,
                        DriverKind::RecurringIncome,
                    ));
                }
            }
            TransactionKind::Expense => {
                out.expense += def.amount;
                let driver = Driver::new(def.description.clone(), def.amount, DriverKind::RecurringExpense);
                if def.amount >= expense_threshold {
                    out.expense_drivers.push(driver.clone());
                }
                out.fixed_expenses.push(driver);
            }
        }
    }
    out
}
