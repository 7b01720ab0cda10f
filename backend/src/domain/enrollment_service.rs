//! Enrollment orchestration.
//!
//! [`EnrollmentService`] implements the enrollment driving ports. It checks
//! travel existence, host or applicant authority and the capacity policy,
//! delegates the writes to the enrollment repository and then triggers
//! notifications. Acceptance is written through
//! [`EnrollmentRepository::record_acceptance`], which re-checks status and
//! capacity under a travel row lock, so the capacity check here is only the
//! fast path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::enrollment_service_support::{
    RECRUITMENT_CLOSED, log_notification_failure, map_companion_error, map_enrollment_error,
    map_travel_error, travel_not_found,
};
use crate::domain::ports::{
    AcceptanceRecord, CompanionRepository, CreateEnrollmentRequest, DeleteEnrollmentRequest,
    EnrollmentCommand, EnrollmentDecisionRequest, EnrollmentPayload, EnrollmentQuery,
    EnrollmentRepository, ListTravelEnrollmentsRequest, ListTravelEnrollmentsResponse,
    MarkEnrollmentsViewedRequest, TravelNotifier, TravelRepository,
};
use crate::domain::{
    Enrollment, EnrollmentEvent, EnrollmentNumber, EnrollmentStatus, Error, NewEnrollment, Travel,
    TravelCapacity, TravelNotificationKind, TravelNumber, UserNumber,
};

/// Enrollment service implementing [`EnrollmentCommand`] and
/// [`EnrollmentQuery`].
#[derive(Clone)]
pub struct EnrollmentService<T, E, C, N> {
    travels: Arc<T>,
    enrollments: Arc<E>,
    companions: Arc<C>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<T, E, C, N> EnrollmentService<T, E, C, N> {
    /// Create a service over the given collaborators.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use companion_backend::domain::EnrollmentService;
    /// # use companion_backend::domain::ports::{
    /// #     FixtureCompanionRepository, FixtureEnrollmentRepository, FixtureTravelNotifier,
    /// #     FixtureTravelRepository,
    /// # };
    /// # use mockable::DefaultClock;
    /// let service = EnrollmentService::new(
    ///     Arc::new(FixtureTravelRepository),
    ///     Arc::new(FixtureEnrollmentRepository),
    ///     Arc::new(FixtureCompanionRepository),
    ///     Arc::new(FixtureTravelNotifier),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        travels: Arc<T>,
        enrollments: Arc<E>,
        companions: Arc<C>,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            travels,
            enrollments,
            companions,
            notifier,
            clock,
        }
    }
}

impl<T, E, C, N> EnrollmentService<T, E, C, N>
where
    T: TravelRepository,
    E: EnrollmentRepository,
    C: CompanionRepository,
    N: TravelNotifier,
{
    async fn load_travel(&self, travel_number: TravelNumber) -> Result<Travel, Error> {
        self.travels
            .find_by_number(travel_number)
            .await
            .map_err(map_travel_error)?
            .ok_or_else(|| travel_not_found(travel_number))
    }

    async fn load_enrollment(&self, number: EnrollmentNumber) -> Result<Enrollment, Error> {
        self.enrollments
            .find_by_number(number)
            .await
            .map_err(map_enrollment_error)?
            .ok_or_else(|| Error::not_found(format!("enrollment {number} does not exist")))
    }

    /// Load an enrollment and its travel, and require `request_user` to host
    /// the travel.
    async fn load_for_host_decision(
        &self,
        request: EnrollmentDecisionRequest,
        event: EnrollmentEvent,
    ) -> Result<(Enrollment, Travel), Error> {
        let enrollment = self.load_enrollment(request.enrollment_number).await?;
        let travel = self.load_travel(enrollment.travel_number()).await?;
        if !travel.is_travel_host_user(request.request_user) {
            return Err(Error::forbidden(format!(
                "only the travel host can {event} enrollments"
            )));
        }
        enrollment
            .next_status(event)
            .map_err(|err| Error::invalid_state(err.to_string()))?;
        Ok((enrollment, travel))
    }

    async fn require_host(&self, travel: &Travel, request_user: UserNumber) -> Result<(), Error> {
        let is_host = self
            .travels
            .exists_by_number_and_user_number(travel.number(), request_user)
            .await
            .map_err(map_travel_error)?;
        if is_host {
            Ok(())
        } else {
            Err(Error::forbidden(
                "only the travel host can manage its enrollments",
            ))
        }
    }

    async fn companion_count(&self, travel_number: TravelNumber) -> Result<u64, Error> {
        self.companions
            .count_by_travel(travel_number)
            .await
            .map_err(map_companion_error)
    }
}

#[async_trait]
impl<T, E, C, N> EnrollmentCommand for EnrollmentService<T, E, C, N>
where
    T: TravelRepository,
    E: EnrollmentRepository,
    C: CompanionRepository,
    N: TravelNotifier,
{
    async fn create(&self, request: CreateEnrollmentRequest) -> Result<EnrollmentPayload, Error> {
        let travel = self.load_travel(request.travel_number).await?;
        if !travel.available_for_enroll() {
            return Err(Error::invalid_state(
                "travel is not available for enrollment",
            ));
        }

        let new = NewEnrollment::pending(
            travel.number(),
            request.request_user,
            request.message,
            self.clock.utc(),
        );
        let enrollment = self
            .enrollments
            .save(&new)
            .await
            .map_err(map_enrollment_error)?;
        info!(
            enrollment = %enrollment.number(),
            travel = %travel.number(),
            applicant = %enrollment.applicant(),
            "enrollment submitted"
        );

        log_notification_failure(
            TravelNotificationKind::HostApplication,
            &travel,
            self.notifier.notify_host_of_application(&travel).await,
        );
        log_notification_failure(
            TravelNotificationKind::ApplicantSubmission,
            &travel,
            self.notifier
                .notify_applicant_of_submission(&travel, enrollment.applicant())
                .await,
        );

        Ok(EnrollmentPayload::from(enrollment))
    }

    async fn delete(&self, request: DeleteEnrollmentRequest) -> Result<(), Error> {
        let enrollment = self.load_enrollment(request.enrollment_number).await?;
        if !enrollment.is_owned_by(request.request_user) {
            return Err(Error::forbidden(
                "only the applicant can withdraw an enrollment",
            ));
        }

        self.enrollments
            .delete(enrollment.number())
            .await
            .map_err(map_enrollment_error)?;
        info!(
            enrollment = %enrollment.number(),
            status = %enrollment.status(),
            "enrollment withdrawn"
        );
        Ok(())
    }

    async fn accept(&self, request: EnrollmentDecisionRequest) -> Result<(), Error> {
        let (enrollment, travel) = self
            .load_for_host_decision(request, EnrollmentEvent::Accept)
            .await?;

        let companion_count = self.companion_count(travel.number()).await?;
        if !TravelCapacity::new(&travel, companion_count).available_for_add_companion() {
            return Err(Error::invalid_state(RECRUITMENT_CLOSED));
        }

        let companion = self
            .enrollments
            .record_acceptance(&AcceptanceRecord {
                enrollment_number: enrollment.number(),
                travel_number: travel.number(),
                applicant: enrollment.applicant(),
            })
            .await
            .map_err(map_enrollment_error)?;
        info!(
            enrollment = %enrollment.number(),
            travel = %travel.number(),
            companion = %companion.number,
            "enrollment accepted"
        );

        log_notification_failure(
            TravelNotificationKind::Accepted,
            &travel,
            self.notifier
                .notify_accepted(&travel, enrollment.applicant())
                .await,
        );

        // TODO: notify companions, pending applicants and bookmarkers once the
        // travel fills up.
        if TravelCapacity::new(&travel, companion_count.saturating_add(1)).is_full_companion() {
            debug!(travel = %travel.number(), "travel reached capacity");
        }
        Ok(())
    }

    async fn reject(&self, request: EnrollmentDecisionRequest) -> Result<(), Error> {
        let (enrollment, travel) = self
            .load_for_host_decision(request, EnrollmentEvent::Reject)
            .await?;

        self.enrollments
            .reject(enrollment.number())
            .await
            .map_err(map_enrollment_error)?;
        info!(
            enrollment = %enrollment.number(),
            travel = %travel.number(),
            "enrollment rejected"
        );

        log_notification_failure(
            TravelNotificationKind::Rejected,
            &travel,
            self.notifier
                .notify_rejected(&travel, enrollment.applicant())
                .await,
        );
        Ok(())
    }

    async fn mark_enrollments_viewed(
        &self,
        request: MarkEnrollmentsViewedRequest,
    ) -> Result<(), Error> {
        let travel = self.load_travel(request.travel_number).await?;
        self.require_host(&travel, request.request_user).await?;
        self.travels
            .update_enrollments_last_viewed_at(travel.number(), request.viewed_at)
            .await
            .map_err(map_travel_error)
    }
}

#[async_trait]
impl<T, E, C, N> EnrollmentQuery for EnrollmentService<T, E, C, N>
where
    T: TravelRepository,
    E: EnrollmentRepository,
    C: CompanionRepository,
    N: TravelNotifier,
{
    async fn find_enrollments_by_travel_number(
        &self,
        request: ListTravelEnrollmentsRequest,
    ) -> Result<ListTravelEnrollmentsResponse, Error> {
        let travel = self.load_travel(request.travel_number).await?;
        self.require_host(&travel, request.request_user).await?;

        let enrollments = self
            .enrollments
            .list_pending_by_travel(travel.number())
            .await
            .map_err(map_enrollment_error)?;
        Ok(ListTravelEnrollmentsResponse {
            total_count: enrollments.len() as u64,
            enrollments: enrollments.into_iter().map(Into::into).collect(),
        })
    }

    async fn pending_enrollment_count(&self, travel_number: TravelNumber) -> Result<u64, Error> {
        let travel = self.load_travel(travel_number).await?;
        self.enrollments
            .count_by_travel_and_status(travel.number(), EnrollmentStatus::Pending)
            .await
            .map_err(map_enrollment_error)
    }

    async fn enrollments_last_viewed_at(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        let travel = self.load_travel(travel_number).await?;
        Ok(travel.enrollments_last_viewed_at())
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
