//! PostgreSQL-backed `TravelRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TravelRepository, TravelRepositoryError};
use crate::domain::{Travel, TravelNumber, UserNumber};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::TravelRow;
use super::pool::{DbPool, PoolError};
use super::row_mapping::travel_from_row;
use super::schema::travels;

/// Diesel adapter for travel reads and the last-viewed marker.
#[derive(Clone)]
pub struct DieselTravelRepository {
    pool: DbPool,
}

impl DieselTravelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TravelRepositoryError {
    map_basic_pool_error(error, TravelRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TravelRepositoryError {
    map_basic_diesel_error(
        error,
        TravelRepositoryError::query,
        TravelRepositoryError::connection,
    )
}

#[async_trait]
impl TravelRepository for DieselTravelRepository {
    async fn find_by_number(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Option<Travel>, TravelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TravelRow> = travels::table
            .filter(travels::number.eq(travel_number.value()))
            .select(TravelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(travel_from_row)
            .transpose()
            .map_err(TravelRepositoryError::query)
    }

    async fn exists_by_number_and_user_number(
        &self,
        travel_number: TravelNumber,
        user_number: UserNumber,
    ) -> Result<bool, TravelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            travels::table
                .filter(travels::number.eq(travel_number.value()))
                .filter(travels::user_number.eq(user_number.value())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn update_enrollments_last_viewed_at(
        &self,
        travel_number: TravelNumber,
        viewed_at: DateTime<Utc>,
    ) -> Result<(), TravelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(travels::table.filter(travels::number.eq(travel_number.value())))
            .set(travels::enrollments_last_viewed_at.eq(Some(viewed_at)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
