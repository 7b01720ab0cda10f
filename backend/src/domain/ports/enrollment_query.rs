//! Driving port for enrollment reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, TravelNumber, UserNumber};

use super::EnrollmentPayload;

/// Host request for the pending enrollments of a travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTravelEnrollmentsRequest {
    pub travel_number: TravelNumber,
    pub request_user: UserNumber,
}

/// Pending enrollments of a travel, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTravelEnrollmentsResponse {
    pub total_count: u64,
    pub enrollments: Vec<EnrollmentPayload>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// List pending enrollments. Only the host may read them.
    async fn find_enrollments_by_travel_number(
        &self,
        request: ListTravelEnrollmentsRequest,
    ) -> Result<ListTravelEnrollmentsResponse, Error>;

    /// Count pending enrollments of an existing travel.
    async fn pending_enrollment_count(&self, travel_number: TravelNumber) -> Result<u64, Error>;

    /// When the host last opened the enrollment list, if ever.
    async fn enrollments_last_viewed_at(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Option<DateTime<Utc>>, Error>;
}
