//! Driving port for enrollment mutations.
//!
//! Every request names the acting user explicitly; adapters resolve it from
//! their own authentication context before calling in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Enrollment, EnrollmentMessage, EnrollmentNumber, EnrollmentStatus, Error, TravelNumber,
    UserNumber,
};

/// Serializable enrollment view returned by driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    pub enrollment_number: EnrollmentNumber,
    pub travel_number: TravelNumber,
    pub user_number: UserNumber,
    pub message: Option<String>,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentPayload {
    fn from(value: Enrollment) -> Self {
        Self {
            enrollment_number: value.number(),
            travel_number: value.travel_number(),
            user_number: value.applicant(),
            message: value.message().map(|message| message.as_str().to_owned()),
            status: value.status(),
            created_at: value.created_at(),
        }
    }
}

/// Request to apply for a travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEnrollmentRequest {
    pub travel_number: TravelNumber,
    pub message: Option<EnrollmentMessage>,
    pub request_user: UserNumber,
}

/// Request from an applicant to withdraw an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteEnrollmentRequest {
    pub enrollment_number: EnrollmentNumber,
    pub request_user: UserNumber,
}

/// Host decision on an enrollment; used for both acceptance and rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentDecisionRequest {
    pub enrollment_number: EnrollmentNumber,
    pub request_user: UserNumber,
}

/// Host request to move the enrollment-list "last viewed" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkEnrollmentsViewedRequest {
    pub travel_number: TravelNumber,
    pub request_user: UserNumber,
    pub viewed_at: DateTime<Utc>,
}

/// Driving port for enrollment write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Submit a pending enrollment for an open travel.
    ///
    /// Fails with `not_found` when the travel is missing and `invalid_state`
    /// when it no longer accepts enrollments.
    async fn create(&self, request: CreateEnrollmentRequest) -> Result<EnrollmentPayload, Error>;

    /// Withdraw an enrollment. Only its applicant may do so.
    async fn delete(&self, request: DeleteEnrollmentRequest) -> Result<(), Error>;

    /// Accept a pending enrollment and add the applicant as a companion.
    async fn accept(&self, request: EnrollmentDecisionRequest) -> Result<(), Error>;

    /// Reject a pending enrollment.
    async fn reject(&self, request: EnrollmentDecisionRequest) -> Result<(), Error>;

    async fn mark_enrollments_viewed(&self, request: MarkEnrollmentsViewedRequest)
    -> Result<(), Error>;
}
