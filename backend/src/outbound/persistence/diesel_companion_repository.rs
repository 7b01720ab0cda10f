//! PostgreSQL-backed `CompanionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CompanionRepository, CompanionRepositoryError};
use crate::domain::{Companion, TravelNumber};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CompanionRow;
use super::pool::{DbPool, PoolError};
use super::row_mapping::companion_from_row;
use super::schema::companions;

#[derive(Clone)]
pub struct DieselCompanionRepository {
    pool: DbPool,
}

impl DieselCompanionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompanionRepositoryError {
    map_basic_pool_error(error, CompanionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CompanionRepositoryError {
    map_basic_diesel_error(
        error,
        CompanionRepositoryError::query,
        CompanionRepositoryError::connection,
    )
}

#[async_trait]
impl CompanionRepository for DieselCompanionRepository {
    async fn count_by_travel(
        &self,
        travel_number: TravelNumber,
    ) -> Result<u64, CompanionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = companions::table
            .filter(companions::travel_number.eq(travel_number.value()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| CompanionRepositoryError::query("negative row count"))
    }

    async fn list_by_travel(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Vec<Companion>, CompanionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CompanionRow> = companions::table
            .filter(companions::travel_number.eq(travel_number.value()))
            .order(companions::number.asc())
            .select(CompanionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(companion_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CompanionRepositoryError::query)
    }
}
