//! Bullionfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Bullionfolio.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod commodities;
pub mod constants;
pub mod errors;
pub mod investments;
pub mod rates;
pub mod units;
pub mod users;
pub mod utils;
pub mod valuation;

// Re-export common types
pub use commodities::Commodity;
pub use valuation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
