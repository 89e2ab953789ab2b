//! Rates module - domain models, services, and traits.

mod rates_model;
mod rates_service;
mod rates_traits;

pub use rates_model::{NewRate, Rate, RateKind, RateRecord};
pub use rates_service::RateService;
pub use rates_traits::{RateRepositoryTrait, RateServiceTrait};
