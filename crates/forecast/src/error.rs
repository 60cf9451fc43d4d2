use thiserror::Error;

use hearth_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// A legacy installment breaks `total_installments >= current_installment >= 1`.
    #[error("invalid installment '{description}': {current}/{total}")]
    InvalidInstallment {
        description: String,
        current: u32,
        total: u32,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}
