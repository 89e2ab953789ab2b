//! Investment domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::commodities::Commodity;
use crate::units::{RateBasis, WeightUnit};

/// A recorded purchase of gold or silver.
///
/// Weight is canonical milligrams and the buy rate is canonical per-gram,
/// regardless of the units the user entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub commodity: Commodity,
    pub weight_milligrams: i64,
    pub buy_rate_per_gram: Decimal,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
    pub owner_id: String,
}

/// Input model for creating or replacing an investment.
///
/// All fields are explicit; weight and rate carry their unit so conversion
/// to the canonical representation happens exactly once, in the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub weight: Decimal,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    pub rate: Decimal,
    #[serde(default)]
    pub rate_basis: RateBasis,
    /// Defaults to today when absent.
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Canonical insert form handed to the repository.
///
/// Produced by the service after unit normalization and validation; the
/// storage layer assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRecord {
    pub commodity: Commodity,
    pub weight_milligrams: i64,
    pub buy_rate_per_gram: Decimal,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
    pub owner_id: String,
}

/// Outcome of a bulk spreadsheet import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<String>,
}
