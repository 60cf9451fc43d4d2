//! Income resolver: pick one income figure per month, never blend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::FamilySettings;

/// Which rule produced a month's projected income.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Anchor,
    Recurring,
    Historical,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedIncome {
    pub amount: Decimal,
    pub source: IncomeSource,
}

/// First match wins: fixed anchor, then non-zero recurring income, then the
/// historical average.
pub fn resolve_income(
    settings: &FamilySettings,
    recurring_income: Decimal,
    avg_income: Decimal,
) -> ResolvedIncome {
    if let Some(anchor) = settings.fixed_anchor() {
        return ResolvedIncome {
            amount: anchor,
            source: IncomeSource::Anchor,
        };
    }
    if !recurring_income.is_zero() {
        return ResolvedIncome {
            amount: recurring_income,
            source: IncomeSource::Recurring,
        };
    }
    ResolvedIncome {
        amount: avg_income,
        source: IncomeSource::Historical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IncomeType;

    fn settings(anchor: Option<i64>, income_type: Option<IncomeType>) -> FamilySettings {
        FamilySettings {
            income_anchor_value: anchor.map(Decimal::from),
            income_type,
            accounting_regime: None,
        }
    }

    #[test]
    fn fixed_anchor_overrides_larger_signals() {
        let s = settings(Some(3000), Some(IncomeType::Fixed));
        let r = resolve_income(&s, Decimal::from(9000), Decimal::from(12000));
        assert_eq!(r.amount, Decimal::from(3000));
        assert_eq!(r.source, IncomeSource::Anchor);
    }

    #[test]
    fn variable_anchor_is_ignored() {
        let s = settings(Some(3000), Some(IncomeType::Variable));
        let r = resolve_income(&s, Decimal::from(9000), Decimal::from(12000));
        assert_eq!(r.source, IncomeSource::Recurring);
        assert_eq!(r.amount, Decimal::from(9000));
    }

    #[test]
    fn falls_back_to_history_when_no_recurring_income() {
        let r = resolve_income(&FamilySettings::default(), Decimal::ZERO, Decimal::from(4200));
        assert_eq!(r.source, IncomeSource::Historical);
        assert_eq!(r.amount, Decimal::from(4200));
    }

    #[test]
    fn no_signals_at_all_resolves_to_zero() {
        let r = resolve_income(&FamilySettings::default(), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(r.amount, Decimal::ZERO);
        assert_eq!(r.source, IncomeSource::Historical);
    }
}
