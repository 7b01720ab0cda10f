//! Port for enrollment persistence, including the atomic acceptance write.

use async_trait::async_trait;

use crate::domain::{
    Companion, Enrollment, EnrollmentNumber, EnrollmentStatus, NewEnrollment, TravelNumber,
    UserNumber,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "enrollment repository query failed: {message}",
        /// The enrollment row vanished between lookup and write.
        NotFound { enrollment_number: i64 } => "enrollment {enrollment_number} not found",
        /// The enrollment was resolved by a concurrent request.
        StatusConflict { status: EnrollmentStatus } => "enrollment is already {status}",
        /// The travel reached `max_person` companions.
        CapacityExhausted { max_person: u32 } =>
            "travel already has {max_person} companions",
        /// The applicant already holds a seat on the travel.
        AlreadyCompanion { travel_number: i32, user_number: i32 } =>
            "user {user_number} is already a companion of travel {travel_number}",
        /// The travel row vanished before it could be locked.
        TravelNotFound { travel_number: i32 } => "travel {travel_number} not found",
    }
}

/// Everything the store needs to accept an enrollment in one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceRecord {
    pub enrollment_number: EnrollmentNumber,
    pub travel_number: TravelNumber,
    pub applicant: UserNumber,
}

/// Enrollment store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Persist a new enrollment and return it with its generated number.
    async fn save(&self, enrollment: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError>;

    async fn find_by_number(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Remove an enrollment whatever its status.
    async fn delete(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<(), EnrollmentRepositoryError>;

    /// Pending enrollments for a travel, newest first.
    async fn list_pending_by_travel(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    async fn count_by_travel_and_status(
        &self,
        travel_number: TravelNumber,
        status: EnrollmentStatus,
    ) -> Result<u64, EnrollmentRepositoryError>;

    /// Move a pending enrollment to `REJECTED`.
    ///
    /// Fails with [`EnrollmentRepositoryError::StatusConflict`] when the
    /// enrollment is no longer pending.
    async fn reject(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<(), EnrollmentRepositoryError>;

    /// Mark the enrollment `ACCEPTED` and insert the companion atomically.
    ///
    /// Implementations serialise concurrent acceptances per travel and
    /// re-check both the pending status and the capacity before writing.
    async fn record_acceptance(
        &self,
        record: &AcceptanceRecord,
    ) -> Result<Companion, EnrollmentRepositoryError>;
}

/// Fixture repository for wiring without a database.
///
/// Writes succeed without storing anything and reads return nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn save(&self, enrollment: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError> {
        Ok(Enrollment::from_parts(
            EnrollmentNumber::new(1),
            enrollment.clone(),
            EnrollmentStatus::Pending,
        ))
    }

    async fn find_by_number(
        &self,
        _enrollment_number: EnrollmentNumber,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(None)
    }

    async fn delete(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<(), EnrollmentRepositoryError> {
        Err(EnrollmentRepositoryError::not_found(enrollment_number.value()))
    }

    async fn list_pending_by_travel(
        &self,
        _travel_number: TravelNumber,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_by_travel_and_status(
        &self,
        _travel_number: TravelNumber,
        _status: EnrollmentStatus,
    ) -> Result<u64, EnrollmentRepositoryError> {
        Ok(0)
    }

    async fn reject(
        &self,
        enrollment_number: EnrollmentNumber,
    ) -> Result<(), EnrollmentRepositoryError> {
        Err(EnrollmentRepositoryError::not_found(enrollment_number.value()))
    }

    async fn record_acceptance(
        &self,
        record: &AcceptanceRecord,
    ) -> Result<Companion, EnrollmentRepositoryError> {
        Err(EnrollmentRepositoryError::not_found(
            record.enrollment_number.value(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_save_returns_pending_enrollment() {
        let applicant = UserNumber::new(5).expect("valid");
        let new = NewEnrollment::pending(TravelNumber::new(1), applicant, None, Utc::now());
        let saved = FixtureEnrollmentRepository
            .save(&new)
            .await
            .expect("fixture save succeeds");
        assert_eq!(saved.status(), EnrollmentStatus::Pending);
        assert_eq!(saved.applicant(), applicant);
    }

    #[rstest]
    fn status_conflict_names_current_status() {
        let err = EnrollmentRepositoryError::status_conflict(EnrollmentStatus::Accepted);
        assert_eq!(err.to_string(), "enrollment is already ACCEPTED");
    }

    #[rstest]
    fn capacity_error_names_ceiling() {
        let err = EnrollmentRepositoryError::capacity_exhausted(2_u32);
        assert_eq!(err.to_string(), "travel already has 2 companions");
    }

    #[rstest]
    fn duplicate_companion_names_both_numbers() {
        let err = EnrollmentRepositoryError::already_companion(3, 5);
        assert_eq!(err.to_string(), "user 5 is already a companion of travel 3");
    }
}
