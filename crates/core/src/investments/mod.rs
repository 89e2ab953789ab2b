//! Investments module - domain models, services, import/export, and traits.

pub mod import;
mod investments_model;
mod investments_service;
mod investments_traits;

pub use investments_model::{ImportResult, Investment, InvestmentRecord, NewInvestment};
pub use investments_service::InvestmentService;
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
