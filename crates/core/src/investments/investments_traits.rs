use async_trait::async_trait;

use crate::commodities::Commodity;
use crate::errors::Result;
use crate::investments::investments_model::{
    ImportResult, Investment, InvestmentRecord, NewInvestment,
};

/// Trait for investment repository operations.
///
/// Every query and mutation is scoped to an owner; the repository must not
/// return or touch another user's records.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Lists holdings, newest purchase first.
    fn get_investments(&self, commodity: Commodity, owner_id: &str) -> Result<Vec<Investment>>;
    fn get_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        investment_id: &str,
    ) -> Result<Option<Investment>>;
    async fn insert_investment(&self, record: InvestmentRecord) -> Result<Investment>;
    /// Inserts a batch in one transaction; used by bulk import after rows
    /// have been individually validated.
    async fn insert_investments(&self, records: Vec<InvestmentRecord>) -> Result<usize>;
    async fn replace_investment(
        &self,
        investment_id: String,
        record: InvestmentRecord,
    ) -> Result<Option<Investment>>;
    async fn delete_investment(
        &self,
        commodity: Commodity,
        owner_id: String,
        investment_id: String,
    ) -> Result<bool>;
}

/// Trait for investment service operations.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    fn list_investments(&self, commodity: Commodity, owner_id: &str) -> Result<Vec<Investment>>;
    async fn create_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        input: NewInvestment,
    ) -> Result<Investment>;
    async fn replace_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        investment_id: &str,
        input: NewInvestment,
    ) -> Result<Investment>;
    async fn delete_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        investment_id: &str,
    ) -> Result<()>;
    async fn import_sheet(
        &self,
        commodity: Commodity,
        owner_id: &str,
        content: &[u8],
    ) -> Result<ImportResult>;
    fn export_sheet(&self, commodity: Commodity, owner_id: &str) -> Result<Vec<u8>>;
}
