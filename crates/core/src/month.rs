//! Calendar month arithmetic.
//!
//! Projections are computed per calendar month, never per day. `YearMonth`
//! is the single representation of "a month" across the workspace so that
//! activity windows, installment indices and due-date matching all agree on
//! the same boundaries.

use core::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A calendar month (`YYYY-MM`).
///
/// Internally anchored on the first day of the month, so every constructed
/// value is representable as a `NaiveDate`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl ValueObject for YearMonth {}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_month(format!("{year:04}-{month:02}")))
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year(), self.month(), day))
            .unwrap_or(self.0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The month `n` months after this one.
    pub fn plus_months(&self, n: u32) -> DomainResult<Self> {
        self.0
            .checked_add_months(Months::new(n))
            .map(Self)
            .ok_or_else(|| DomainError::invalid_month(format!("{self} + {n} months")))
    }

    /// The month `n` months before this one.
    pub fn minus_months(&self, n: u32) -> DomainResult<Self> {
        self.0
            .checked_sub_months(Months::new(n))
            .map(Self)
            .ok_or_else(|| DomainError::invalid_month(format!("{self} - {n} months")))
    }

    /// Whole calendar months from the month containing `from` to this month.
    ///
    /// Day-of-month is ignored: 2025-01-31 → 2025-02 is one month.
    pub fn months_since(&self, from: NaiveDate) -> i64 {
        let years = i64::from(self.year()) - i64::from(from.year());
        let months = i64::from(self.month()) - i64::from(from.month());
        years * 12 + months
    }

    /// Short human label, e.g. `"Jun 2025"`.
    pub fn label(&self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

impl core::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| DomainError::invalid_month(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DomainError::invalid_month(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| DomainError::invalid_month(s.to_string()))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
