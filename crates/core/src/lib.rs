//! `hearth-core` — shared building blocks for the forecasting workspace.
//!
//! Pure values only: no IO, no HTTP, no persistence concerns.

pub mod context;
pub mod error;
pub mod id;
pub mod money;
pub mod month;
pub mod value_object;

pub use context::FamilyContext;
pub use error::{DomainError, DomainResult};
pub use id::{FamilyId, UserId};
pub use money::{percentage_of, round_cents, round_percentage};
pub use month::YearMonth;
pub use value_object::ValueObject;
