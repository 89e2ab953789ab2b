//! Database models for rates.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use bullionfolio_core::commodities::Commodity;
use bullionfolio_core::errors::{Error, ValidationError};
use bullionfolio_core::rates::{Rate, RateKind, RateRecord};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for rates.
///
/// Decimals and dates are stored as TEXT; parsing back to domain types is
/// fallible, so the conversion is `TryFrom`, not `From`.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RateDB {
    pub id: String,
    pub commodity: String,
    pub rate_per_gram: String,
    pub kind: String,
    pub recorded_at: String,
    pub rate_date: String,
    pub contributed_by: Option<String>,
}

impl RateDB {
    pub fn from_record(record: RateRecord, id: String) -> Self {
        RateDB {
            id,
            commodity: record.commodity.as_str().to_string(),
            rate_per_gram: record.rate_per_gram.to_string(),
            kind: record.kind.as_str().to_string(),
            recorded_at: record.recorded_at.to_rfc3339(),
            rate_date: record.rate_date.format(DATE_FORMAT).to_string(),
            contributed_by: record.contributed_by,
        }
    }
}

impl TryFrom<RateDB> for Rate {
    type Error = Error;

    fn try_from(db: RateDB) -> Result<Self, Self::Error> {
        let recorded_at = DateTime::parse_from_rfc3339(&db.recorded_at)
            .map_err(|e| Error::Validation(ValidationError::DateTimeParse(e)))?
            .with_timezone(&Utc);
        Ok(Rate {
            id: db.id,
            commodity: Commodity::from_str(&db.commodity)?,
            rate_per_gram: Decimal::from_str(&db.rate_per_gram)?,
            kind: RateKind::from_str(&db.kind)?,
            recorded_at,
            rate_date: NaiveDate::parse_from_str(&db.rate_date, DATE_FORMAT)?,
            contributed_by: db.contributed_by,
        })
    }
}
