use async_trait::async_trait;

use crate::commodities::Commodity;
use crate::errors::Result;
use crate::rates::rates_model::{NewRate, Rate, RateRecord};

/// Trait for rate repository operations.
///
/// `insert_rate` must be a single constrained insert: when a closing rate
/// already exists for the record's (commodity, rate_date), the underlying
/// unique index rejects the write and the implementation returns
/// `DatabaseError::UniqueViolation`. Implementations must not pre-check.
#[async_trait]
pub trait RateRepositoryTrait: Send + Sync {
    fn get_latest_closing(&self, commodity: Commodity) -> Result<Option<Rate>>;
    fn get_closing_history(&self, commodity: Commodity, limit: i64) -> Result<Vec<Rate>>;
    async fn insert_rate(&self, record: RateRecord) -> Result<Rate>;
    async fn delete_rate(&self, commodity: Commodity, rate_id: String) -> Result<()>;
}

/// Trait for rate service operations.
#[async_trait]
pub trait RateServiceTrait: Send + Sync {
    async fn add_rate(
        &self,
        commodity: Commodity,
        contributed_by: Option<String>,
        input: NewRate,
    ) -> Result<Rate>;
    fn get_current_rate(&self, commodity: Commodity) -> Result<Option<Rate>>;
    fn get_rate_history(&self, commodity: Commodity, days: Option<i64>) -> Result<Vec<Rate>>;
    async fn delete_rate(&self, commodity: Commodity, rate_id: String) -> Result<()>;
}
