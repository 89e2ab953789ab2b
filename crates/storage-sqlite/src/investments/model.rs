//! Database models for investments.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use bullionfolio_core::commodities::Commodity;
use bullionfolio_core::errors::Error;
use bullionfolio_core::investments::{Investment, InvestmentRecord};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for investments.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// PUT is a full replacement: a None must null the column, not skip it.
#[diesel(treat_none_as_null = true)]
pub struct InvestmentDB {
    pub id: String,
    pub commodity: String,
    pub weight_milligrams: i64,
    pub buy_rate_per_gram: String,
    pub purchase_date: String,
    pub notes: Option<String>,
    pub owner_id: String,
}

impl InvestmentDB {
    pub fn from_record(record: InvestmentRecord, id: String) -> Self {
        InvestmentDB {
            id,
            commodity: record.commodity.as_str().to_string(),
            weight_milligrams: record.weight_milligrams,
            buy_rate_per_gram: record.buy_rate_per_gram.to_string(),
            purchase_date: record.purchase_date.format(DATE_FORMAT).to_string(),
            notes: record.notes,
            owner_id: record.owner_id,
        }
    }
}

impl TryFrom<InvestmentDB> for Investment {
    type Error = Error;

    fn try_from(db: InvestmentDB) -> Result<Self, Self::Error> {
        Ok(Investment {
            id: db.id,
            commodity: Commodity::from_str(&db.commodity)?,
            weight_milligrams: db.weight_milligrams,
            buy_rate_per_gram: Decimal::from_str(&db.buy_rate_per_gram)?,
            purchase_date: NaiveDate::parse_from_str(&db.purchase_date, DATE_FORMAT)?,
            notes: db.notes,
            owner_id: db.owner_id,
        })
    }
}
