//! Error types for portfolio valuation.

use thiserror::Error;
use varlens_core::CoreError;
use varlens_traits::TraitError;

/// Result type for valuation operations.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Errors that can occur while valuing a portfolio.
///
/// Both variants are transparent: the message a caller sees is exactly the
/// one produced by holdings validation or by the price store.
#[derive(Error, Debug)]
pub enum ValuationError {
    /// Holdings were malformed.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    /// The price store failed.
    #[error(transparent)]
    DataAccess(#[from] TraitError),
}

impl ValuationError {
    /// Returns true if the failure was caused by caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
