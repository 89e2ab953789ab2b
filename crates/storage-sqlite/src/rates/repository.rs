use bullionfolio_core::commodities::Commodity;
use bullionfolio_core::errors::{DatabaseError, Error};
use bullionfolio_core::rates::{Rate, RateKind, RateRecord, RateRepositoryTrait};
use bullionfolio_core::Result;

use super::model::RateDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::rates;
use crate::schema::rates::dsl::*;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct RateRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RateRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RateRepository { pool, writer }
    }
}

#[async_trait]
impl RateRepositoryTrait for RateRepository {
    fn get_latest_closing(&self, query_commodity: Commodity) -> Result<Option<Rate>> {
        let mut conn = get_connection(&self.pool)?;
        let rate_db = rates
            .filter(commodity.eq(query_commodity.as_str()))
            .filter(kind.eq(RateKind::Closing.as_str()))
            .order(rate_date.desc())
            .first::<RateDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        rate_db.map(Rate::try_from).transpose()
    }

    fn get_closing_history(&self, query_commodity: Commodity, limit: i64) -> Result<Vec<Rate>> {
        let mut conn = get_connection(&self.pool)?;
        let rates_db = rates
            .filter(commodity.eq(query_commodity.as_str()))
            .filter(kind.eq(RateKind::Closing.as_str()))
            .order(rate_date.desc())
            .limit(limit)
            .load::<RateDB>(&mut conn)
            .map_err(StorageError::from)?;
        rates_db.into_iter().map(Rate::try_from).collect()
    }

    async fn insert_rate(&self, record: RateRecord) -> Result<Rate> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Rate> {
                let rate_db = RateDB::from_record(record, Uuid::new_v4().to_string());

                // A second closing rate for the same (commodity, day) trips
                // the partial unique index here; there is no pre-check.
                let inserted = diesel::insert_into(rates::table)
                    .values(&rate_db)
                    .returning(RateDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Rate::try_from(inserted)
            })
            .await
    }

    async fn delete_rate(&self, query_commodity: Commodity, rate_id: String) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(
                    rates
                        .filter(id.eq(rate_id.clone()))
                        .filter(commodity.eq(query_commodity.as_str())),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Rate {} not found",
                        rate_id
                    ))));
                }
                Ok(())
            })
            .await
    }
}
