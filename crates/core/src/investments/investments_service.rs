use std::sync::Arc;

use async_trait::async_trait;

use crate::commodities::Commodity;
use crate::errors::{DatabaseError, Error, Result};
use crate::units;
use crate::utils::time_utils;

use super::import;
use super::investments_model::{ImportResult, Investment, InvestmentRecord, NewInvestment};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};

pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
}

impl InvestmentService {
    pub fn new(repository: Arc<dyn InvestmentRepositoryTrait>) -> Self {
        InvestmentService { repository }
    }

    /// Normalizes a submission to canonical units.
    ///
    /// Weight becomes whole milligrams, the rate becomes per-gram, and the
    /// purchase date defaults to today. This is the only place entry units
    /// are interpreted.
    fn canonicalize(
        commodity: Commodity,
        owner_id: &str,
        input: NewInvestment,
    ) -> Result<InvestmentRecord> {
        let weight_milligrams = input.weight_unit.to_milligrams(input.weight)?;
        if weight_milligrams == 0 {
            return Err(Error::Valuation(crate::errors::ValuationError::InvalidQuantity(
                format!("weight {} rounds to zero milligrams", input.weight),
            )));
        }
        let buy_rate_per_gram = input.rate_basis.to_per_gram(input.rate)?;
        let purchase_date = input.purchase_date.unwrap_or_else(time_utils::today);
        Ok(InvestmentRecord {
            commodity,
            weight_milligrams,
            buy_rate_per_gram,
            purchase_date,
            notes: input.notes.filter(|n| !n.trim().is_empty()),
            owner_id: owner_id.to_string(),
        })
    }

    fn not_found(investment_id: &str) -> Error {
        Error::Database(DatabaseError::NotFound(format!(
            "Investment {} not found",
            investment_id
        )))
    }
}

#[async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn list_investments(&self, commodity: Commodity, owner_id: &str) -> Result<Vec<Investment>> {
        self.repository.get_investments(commodity, owner_id)
    }

    async fn create_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        input: NewInvestment,
    ) -> Result<Investment> {
        let record = Self::canonicalize(commodity, owner_id, input)?;
        self.repository.insert_investment(record).await
    }

    async fn replace_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        investment_id: &str,
        input: NewInvestment,
    ) -> Result<Investment> {
        let record = Self::canonicalize(commodity, owner_id, input)?;
        self.repository
            .replace_investment(investment_id.to_string(), record)
            .await?
            .ok_or_else(|| Self::not_found(investment_id))
    }

    async fn delete_investment(
        &self,
        commodity: Commodity,
        owner_id: &str,
        investment_id: &str,
    ) -> Result<()> {
        let deleted = self
            .repository
            .delete_investment(commodity, owner_id.to_string(), investment_id.to_string())
            .await?;
        if !deleted {
            return Err(Self::not_found(investment_id));
        }
        Ok(())
    }

    async fn import_sheet(
        &self,
        commodity: Commodity,
        owner_id: &str,
        content: &[u8],
    ) -> Result<ImportResult> {
        let outcome = import::parse_sheet(content)?;
        let mut errors = outcome.errors;
        let mut records = Vec::with_capacity(outcome.rows.len());

        for row in outcome.rows {
            // Sheet rows quote weight in grams and rate per tola.
            let input = NewInvestment {
                weight: row.weight_grams,
                weight_unit: units::WeightUnit::Grams,
                rate: row.rate_per_tola,
                rate_basis: units::RateBasis::PerTola,
                purchase_date: Some(row.purchase_date),
                notes: row.notes,
            };
            match Self::canonicalize(commodity, owner_id, input) {
                Ok(record) => records.push(record),
                Err(e) => errors.push(format!("Row {}: {}", row.row_number, e)),
            }
        }

        let imported = if records.is_empty() {
            0
        } else {
            self.repository.insert_investments(records).await?
        };

        Ok(ImportResult { imported, errors })
    }

    fn export_sheet(&self, commodity: Commodity, owner_id: &str) -> Result<Vec<u8>> {
        let investments = self.repository.get_investments(commodity, owner_id)?;
        import::export_sheet(&investments)
    }
}
