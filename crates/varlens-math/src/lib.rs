//! # Varlens Math
//!
//! Numerical helpers for the Varlens portfolio risk library.
//!
//! - **Statistics**: linear-interpolated percentiles over order statistics
//! - **Returns**: simple day-over-day percentage change
//!
//! The percentile convention matches the common "linear" definition used by
//! scientific computing packages, so VaR figures reproduce to ~1e-12.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::statistics::{pct_change, percentile};
}

pub use error::{MathError, MathResult};
