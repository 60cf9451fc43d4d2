//! Rounding rules for reported figures.
//!
//! Sums are carried at full `Decimal` precision; rounding happens once, when
//! an output record is assembled.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to cents (half away from zero).
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage to one decimal place (half away from zero).
pub fn round_percentage(pct: Decimal) -> Decimal {
    pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, or zero when `whole` is not positive.
///
/// Never negative. Saturates at `Decimal::MAX` instead of overflowing.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO || part <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}
