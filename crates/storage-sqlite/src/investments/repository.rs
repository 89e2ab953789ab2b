use bullionfolio_core::commodities::Commodity;
use bullionfolio_core::investments::{Investment, InvestmentRecord, InvestmentRepositoryTrait};
use bullionfolio_core::Result;

use super::model::InvestmentDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investments;
use crate::schema::investments::dsl::*;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct InvestmentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        InvestmentRepository { pool, writer }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_investments(
        &self,
        query_commodity: Commodity,
        query_owner: &str,
    ) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let investments_db = investments
            .filter(commodity.eq(query_commodity.as_str()))
            .filter(owner_id.eq(query_owner))
            .order(purchase_date.desc())
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        investments_db.into_iter().map(Investment::try_from).collect()
    }

    fn get_investment(
        &self,
        query_commodity: Commodity,
        query_owner: &str,
        investment_id: &str,
    ) -> Result<Option<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let investment_db = investments
            .filter(id.eq(investment_id))
            .filter(commodity.eq(query_commodity.as_str()))
            .filter(owner_id.eq(query_owner))
            .first::<InvestmentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        investment_db.map(Investment::try_from).transpose()
    }

    async fn insert_investment(&self, record: InvestmentRecord) -> Result<Investment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let investment_db =
                    InvestmentDB::from_record(record, Uuid::new_v4().to_string());
                let inserted = diesel::insert_into(investments::table)
                    .values(&investment_db)
                    .returning(InvestmentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Investment::try_from(inserted)
            })
            .await
    }

    async fn insert_investments(&self, records: Vec<InvestmentRecord>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for record in records {
                    let investment_db =
                        InvestmentDB::from_record(record, Uuid::new_v4().to_string());
                    inserted += diesel::insert_into(investments::table)
                        .values(&investment_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn replace_investment(
        &self,
        investment_id: String,
        record: InvestmentRecord,
    ) -> Result<Option<Investment>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Investment>> {
                let investment_db = InvestmentDB::from_record(record, investment_id.clone());

                // The filter carries the owner and commodity so a stranger's
                // id silently matches nothing.
                let affected = diesel::update(
                    investments
                        .filter(id.eq(investment_id.clone()))
                        .filter(commodity.eq(investment_db.commodity.clone()))
                        .filter(owner_id.eq(investment_db.owner_id.clone())),
                )
                .set(&investment_db)
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Ok(None);
                }
                let refreshed = investments
                    .find(investment_id)
                    .first::<InvestmentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Some(Investment::try_from(refreshed)?))
            })
            .await
    }

    async fn delete_investment(
        &self,
        query_commodity: Commodity,
        query_owner: String,
        investment_id: String,
    ) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::delete(
                    investments
                        .filter(id.eq(investment_id))
                        .filter(commodity.eq(query_commodity.as_str()))
                        .filter(owner_id.eq(query_owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(affected > 0)
            })
            .await
    }
}
