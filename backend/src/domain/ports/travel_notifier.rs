//! Port for dispatching enrollment notifications.
//!
//! Dispatch is best effort: callers log failures and carry on, so adapters
//! must not be relied on for transactional delivery.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Travel, UserNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification adapters.
    pub enum TravelNotifierError {
        Connection { message: String } => "notification store connection failed: {message}",
        Query { message: String } => "notification dispatch failed: {message}",
    }
}

/// Notification dispatch keyed by enrollment event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelNotifier: Send + Sync {
    /// Tell the host that someone applied.
    async fn notify_host_of_application(&self, travel: &Travel) -> Result<(), TravelNotifierError>;

    /// Confirm receipt of an application to the applicant.
    async fn notify_applicant_of_submission(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError>;

    async fn notify_accepted(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError>;

    async fn notify_rejected(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError>;
}

/// Notifier that only records dispatches in the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTravelNotifier;

#[async_trait]
impl TravelNotifier for FixtureTravelNotifier {
    async fn notify_host_of_application(&self, travel: &Travel) -> Result<(), TravelNotifierError> {
        debug!(travel = %travel.number(), host = %travel.host(), "new applicant notification");
        Ok(())
    }

    async fn notify_applicant_of_submission(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError> {
        debug!(travel = %travel.number(), %applicant, "submission notification");
        Ok(())
    }

    async fn notify_accepted(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError> {
        debug!(travel = %travel.number(), %applicant, "acceptance notification");
        Ok(())
    }

    async fn notify_rejected(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError> {
        debug!(travel = %travel.number(), %applicant, "rejection notification");
        Ok(())
    }
}
