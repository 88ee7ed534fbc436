//! # Varlens Traits
//!
//! Trait definitions for the price stores Varlens reads from.
//!
//! This crate contains ONLY trait definitions and performs no I/O itself.
//! All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`price_store`]: Read side ([`PriceStore`]) and ingestion side ([`PriceWriter`])
//! - [`error`]: [`TraitError`], the data-access failure type
//!
//! ## Dependency Injection
//!
//! The valuator and risk engine receive a store handle explicitly:
//!
//! ```ignore
//! let store: Arc<dyn PriceStore> = Arc::new(create_redb_price_store("prices.redb")?);
//! let valuator = PortfolioValuator::new(holdings, store.clone());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod price_store;

// Re-export commonly used types
pub use error::TraitError;
pub use price_store::{PriceStore, PriceWriter, SourceType};
