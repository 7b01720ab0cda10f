//! Internal helpers for enrollment and companion services.

use tracing::warn;

use crate::domain::ports::{
    CompanionRepositoryError, EnrollmentRepositoryError, TravelNotifierError,
    TravelRepositoryError,
};
use crate::domain::{Error, Travel, TravelNotificationKind, TravelNumber};

pub(crate) const RECRUITMENT_CLOSED: &str = "recruitment is closed";
pub(crate) const ALREADY_COMPANION: &str = "user is already a companion of this travel";

pub(crate) fn map_travel_error(error: TravelRepositoryError) -> Error {
    match error {
        TravelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("travel repository unavailable: {message}"))
        }
        TravelRepositoryError::Query { message } => {
            Error::internal(format!("travel repository error: {message}"))
        }
    }
}

pub(crate) fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
        EnrollmentRepositoryError::NotFound { enrollment_number } => {
            Error::not_found(format!("enrollment {enrollment_number} does not exist"))
        }
        EnrollmentRepositoryError::StatusConflict { status } => {
            Error::invalid_state(format!("enrollment is already {status}"))
        }
        EnrollmentRepositoryError::CapacityExhausted { .. } => {
            Error::invalid_state(RECRUITMENT_CLOSED)
        }
        EnrollmentRepositoryError::AlreadyCompanion { .. } => {
            Error::invalid_state(ALREADY_COMPANION)
        }
        EnrollmentRepositoryError::TravelNotFound { travel_number } => {
            travel_not_found(TravelNumber::new(travel_number))
        }
    }
}

pub(crate) fn map_companion_error(error: CompanionRepositoryError) -> Error {
    match error {
        CompanionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("companion repository unavailable: {message}"))
        }
        CompanionRepositoryError::Query { message } => {
            Error::internal(format!("companion repository error: {message}"))
        }
    }
}

pub(crate) fn travel_not_found(travel_number: TravelNumber) -> Error {
    Error::not_found(format!("travel {travel_number} does not exist"))
}

/// Log a failed dispatch; notifications never fail the workflow.
pub(crate) fn log_notification_failure(
    kind: TravelNotificationKind,
    travel: &Travel,
    result: Result<(), TravelNotifierError>,
) {
    if let Err(error) = result {
        warn!(
            kind = kind.as_str(),
            travel = %travel.number(),
            %error,
            "notification dispatch failed"
        );
    }
}
