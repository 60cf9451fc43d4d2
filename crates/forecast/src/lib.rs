//! Recurring-commitment projection engine.
//!
//! Pure domain logic only: no IO, no HTTP, no clock. Callers load the
//! family's inputs, capture "today" once, and call [`project_horizon`].

pub mod commitment;
pub mod drivers;
pub mod error;
pub mod history;
pub mod horizon;
pub mod income;
pub mod installments;
pub mod model;
pub mod recurring;
pub mod surplus;

pub use commitment::{Commitment, compute_commitment};
pub use drivers::{
    DRIVER_CAP, Driver, DriverKind, DriverLists, FIXED_EXPENSE_CAP, INSTALLMENT_DETAIL_CAP,
    InstallmentDetail, attribute_drivers,
};
pub use error::ForecastError;
pub use history::HistoricalBaseline;
pub use horizon::{
    AlertLevel, CurrentMonthSummary, DEFAULT_HORIZON, HorizonProjection, MonthProjection,
    project_horizon,
};
pub use income::{IncomeSource, ResolvedIncome, resolve_income};
pub use installments::{
    InstallmentContribution, InstallmentDue, InstallmentOrigin, InstallmentSource, amortize,
};
pub use model::{
    FamilySettings, ForecastInputs, IncomeType, InstallmentGroup, InstallmentStatus,
    LegacyInstallment, PlannedInstallment, RecurringDefinition, Transaction, TransactionKind,
};
pub use recurring::{RecurringContribution, evaluate_recurring};
pub use surplus::{SurplusEstimate, estimate_surplus};
