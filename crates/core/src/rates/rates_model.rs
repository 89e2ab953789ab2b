//! Market rate domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::commodities::Commodity;
use crate::errors::{Error, ValidationError};
use crate::units::RateBasis;

/// Whether a rate observation is the authoritative daily close or an
/// intraday data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateKind {
    Closing,
    Intraday,
}

impl RateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateKind::Closing => "CLOSING",
            RateKind::Intraday => "INTRADAY",
        }
    }
}

impl FromStr for RateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CLOSING" => Ok(RateKind::Closing),
            "INTRADAY" => Ok(RateKind::Intraday),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown rate kind: {}",
                other
            )))),
        }
    }
}

/// A stored market rate observation.
///
/// `rate_date` is the recorded instant truncated to the local calendar day;
/// it is the uniqueness key for closing rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub id: String,
    pub commodity: Commodity,
    pub rate_per_gram: Decimal,
    pub kind: RateKind,
    pub recorded_at: DateTime<Utc>,
    pub rate_date: NaiveDate,
    pub contributed_by: Option<String>,
}

/// Input model for submitting a rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRate {
    pub value: Decimal,
    #[serde(default)]
    pub basis: RateBasis,
    pub kind: RateKind,
    /// Defaults to "now" when absent.
    pub date: Option<DateTime<Utc>>,
}

/// Canonical insert form handed to the repository; the storage layer
/// assigns the id and enforces closing-rate uniqueness atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub commodity: Commodity,
    pub rate_per_gram: Decimal,
    pub kind: RateKind,
    pub recorded_at: DateTime<Utc>,
    pub rate_date: NaiveDate,
    pub contributed_by: Option<String>,
}
