//! Historical baseline: trailing averages of income and expense.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use hearth_core::YearMonth;

use crate::model::{Transaction, TransactionKind};

const UNCATEGORIZED: &str = "uncategorized";

/// Averages derived from the trailing transaction window.
///
/// Each average divides the total by the number of distinct months that had
/// at least one transaction of that kind (minimum 1), so a family with
/// income in only two of three months is averaged over two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalBaseline {
    pub avg_income: Decimal,
    pub avg_expense: Decimal,
    pub income_months: usize,
    pub expense_months: usize,
    /// Individual expense amounts per category, oldest first.
    pub expense_series: BTreeMap<String, Vec<Decimal>>,
}

impl HistoricalBaseline {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;
        let mut income_months = BTreeSet::new();
        let mut expense_months = BTreeSet::new();
        let mut expense_series: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();

        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|t| t.date);

        for tx in ordered {
            let month = YearMonth::containing(tx.date);
            match tx.kind {
                TransactionKind::Income => {
                    income_total += tx.amount;
                    income_months.insert(month);
                }
                TransactionKind::Expense => {
                    expense_total += tx.amount;
                    expense_months.insert(month);
                    let key = tx.category_id.as_deref().unwrap_or(UNCATEGORIZED);
                    expense_series.entry(key.to_string()).or_default().push(tx.amount);
                }
            }
        }

        Self {
            avg_income: average(income_total, income_months.len()),
            avg_expense: average(expense_total, expense_months.len()),
            income_months: income_months.len(),
            expense_months: expense_months.len(),
            expense_series,
        }
    }

    /// Categories with the largest expense totals, largest first.
    pub fn top_expense_categories(&self, limit: usize) -> Vec<(String, Decimal)> {
        let mut totals: Vec<(String, Decimal)> = self
            .expense_series
            .iter()
            .map(|(category, amounts)| (category.clone(), amounts.iter().copied().sum()))
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        totals.truncate(limit);
        totals
    }
}

fn average(total: Decimal, months: usize) -> Decimal {
    total / Decimal::from(months.max(1))
}
