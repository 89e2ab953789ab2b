mod model;
mod repository;

pub use model::RateDB;
pub use repository::RateRepository;
