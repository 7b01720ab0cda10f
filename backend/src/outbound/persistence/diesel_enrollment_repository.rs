//! PostgreSQL-backed `EnrollmentRepository`.
//!
//! Acceptance runs in one transaction that locks the travel row, so two hosts
//! accepting different enrollments for the last free seat cannot both win.
//! Rejection is a conditional update guarded on `PENDING`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{AcceptanceRecord, EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{
    Companion, Enrollment, EnrollmentNumber, EnrollmentStatus, NewEnrollment, TravelNumber,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CompanionRow, EnrollmentRow, NewCompanionRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::{companion_from_row, enrollment_from_row};
use super::schema::{companions, enrollments, travels};

/// Diesel adapter for enrollment storage.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    map_basic_pool_error(error, EnrollmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    map_basic_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

fn parse_status(raw: &str) -> Result<EnrollmentStatus, EnrollmentRepositoryError> {
    raw.parse::<EnrollmentStatus>()
        .map_err(|err| EnrollmentRepositoryError::query(err.to_string()))
}

fn to_count(value: i64) -> Result<u64, EnrollmentRepositoryError> {
    u64::try_from(value).map_err(|_| EnrollmentRepositoryError::query("negative row count"))
}

/// Failure inside the acceptance transaction.
///
/// Domain outcomes roll the transaction back just like database errors.
enum AcceptanceFailure {
    Database(diesel::result::Error),
    Refused(EnrollmentRepositoryError),
}

impl From<diesel::result::Error> for AcceptanceFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

impl From<AcceptanceFailure> for EnrollmentRepositoryError {
    fn from(failure: AcceptanceFailure) -> Self {
        match failure {
            AcceptanceFailure::Database(error) => map_diesel_error(error),
            AcceptanceFailure::Refused(error) => error,
        }
    }
}

async fn current_status(
    conn: &mut AsyncPgConnection,
    enrollment_number: EnrollmentNumber,
) -> Result<Option<String>, diesel::result::Error> {
    enrollments::table
        .filter(enrollments::number.eq(enrollment_number.value()))
        .select(enrollments::status)
        .first::<String>(conn)
        .await
        .optional()
}

async fn accept_locked(
    conn: &mut AsyncPgConnection,
    record: AcceptanceRecord,
) -> Result<CompanionRow, AcceptanceFailure> {
    let max_person: i32 = travels::table
        .filter(travels::number.eq(record.travel_number.value()))
        .select(travels::max_person)
        .for_update()
        .first::<i32>(conn)
        .await
        .optional()?
        .ok_or_else(|| {
            AcceptanceFailure::Refused(EnrollmentRepositoryError::travel_not_found(
                record.travel_number.value(),
            ))
        })?;

    let status = current_status(conn, record.enrollment_number)
        .await?
        .ok_or_else(|| {
            AcceptanceFailure::Refused(EnrollmentRepositoryError::not_found(
                record.enrollment_number.value(),
            ))
        })?;
    if status != EnrollmentStatus::Pending.as_str() {
        let status = parse_status(&status).map_err(AcceptanceFailure::Refused)?;
        return Err(AcceptanceFailure::Refused(
            EnrollmentRepositoryError::status_conflict(status),
        ));
    }

    let companion_count: i64 = companions::table
        .filter(companions::travel_number.eq(record.travel_number.value()))
        .count()
        .get_result(conn)
        .await?;
    let already_companion: bool = diesel::select(diesel::dsl::exists(
        companions::table
            .filter(companions::travel_number.eq(record.travel_number.value()))
            .filter(companions::user_number.eq(record.applicant.value())),
    ))
    .get_result(conn)
    .await?;
    if already_companion {
        return Err(AcceptanceFailure::Refused(
            EnrollmentRepositoryError::already_companion(
                record.travel_number.value(),
                record.applicant.value(),
            ),
        ));
    }

    if companion_count >= i64::from(max_person) {
        let max_person = u32::try_from(max_person).unwrap_or_default();
        return Err(AcceptanceFailure::Refused(
            EnrollmentRepositoryError::capacity_exhausted(max_person),
        ));
    }

    diesel::update(
        enrollments::table.filter(enrollments::number.eq(record.enrollment_number.value())),
    )
    .set(enrollments::status.eq(EnrollmentStatus::Accepted.as_str()))
    .execute(conn)
    .await?;

    let companion = diesel::insert_into(companions::table)
        .values(&NewCompanionRow {
            travel_number: record.travel_number.value(),
            user_number: record.applicant.value(),
        })
        .returning(CompanionRow::as_returning())
        .get_result(conn)
        .await?;
    Ok(companion)
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn save(&self, enrollment: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(enrollments::table)
            .values(&NewEnrollmentRow {
                travel_number: enrollment.travel_number.value(),
                user_number: enrollment.applicant.value(),
                message: enrollment.message.as_ref().map(|message| message.as_str()),
                status: EnrollmentStatus::Pending.as_str(),
                created_at: enrollment.created_at,
            })
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        enrollment_from_row(row).map_err(EnrollmentRepositoryError::query)
    }

    async fn find_by_number(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EnrollmentRow> = enrollments::table
            .filter(enrollments::number.eq(enrollment_number.value()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(enrollment_from_row)
            .transpose()
            .map_err(EnrollmentRepositoryError::query)
    }

    async fn delete(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            enrollments::table.filter(enrollments::number.eq(enrollment_number.value())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(EnrollmentRepositoryError::not_found(enrollment_number.value()));
        }
        Ok(())
    }

    async fn list_pending_by_travel(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::travel_number.eq(travel_number.value()))
            .filter(enrollments::status.eq(EnrollmentStatus::Pending.as_str()))
            .order((enrollments::created_at.desc(), enrollments::number.desc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(enrollment_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(EnrollmentRepositoryError::query)
    }

    async fn count_by_travel_and_status(
        &self,
        travel_number: TravelNumber,
        status: EnrollmentStatus,
    ) -> Result<u64, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = enrollments::table
            .filter(enrollments::travel_number.eq(travel_number.value()))
            .filter(enrollments::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_count(count)
    }

    async fn reject(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            enrollments::table
                .filter(enrollments::number.eq(enrollment_number.value()))
                .filter(enrollments::status.eq(EnrollmentStatus::Pending.as_str())),
        )
        .set(enrollments::status.eq(EnrollmentStatus::Rejected.as_str()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if updated == 1 {
            return Ok(());
        }

        match current_status(&mut conn, enrollment_number)
            .await
            .map_err(map_diesel_error)?
        {
            Some(status) => {
                let status = parse_status(&status)?;
                debug!(enrollment = %enrollment_number, %status, "reject lost to a concurrent decision");
                Err(EnrollmentRepositoryError::status_conflict(status))
            }
            None => Err(EnrollmentRepositoryError::not_found(enrollment_number.value())),
        }
    }

    async fn record_acceptance(
        &self,
        record: &AcceptanceRecord,
    ) -> Result<Companion, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let record = *record;

        let row = conn
            .transaction(|conn| async move { accept_locked(conn, record).await }.scope_boxed())
            .await
            .map_err(EnrollmentRepositoryError::from)?;

        companion_from_row(row).map_err(EnrollmentRepositoryError::query)
    }
}
