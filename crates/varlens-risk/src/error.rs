//! Error types for risk calculations.

use thiserror::Error;
use varlens_math::MathError;
use varlens_portfolio::ValuationError;
use varlens_traits::TraitError;

/// Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
///
/// Missing data is not represented here; it yields a zero result instead.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Valuation of the underlying portfolio failed
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// Price store failed while reading history
    #[error(transparent)]
    DataAccess(#[from] TraitError),

    /// Numerical failure
    #[error(transparent)]
    Math(#[from] MathError),
}

impl RiskError {
    /// Returns true if the failure was caused by caller input rather than
    /// by the price store.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::Valuation(e) => e.is_invalid_input(),
            Self::DataAccess(_) | Self::Math(_) => false,
        }
    }

    /// Returns true if the price store failed.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            Self::DataAccess(_) | Self::Valuation(ValuationError::DataAccess(_))
        )
    }
}
