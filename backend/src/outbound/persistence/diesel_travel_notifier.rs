//! `TravelNotifier` that persists one notification row per recipient.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{TravelNotifier, TravelNotifierError};
use crate::domain::{Travel, TravelNotificationKind, UserNumber};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewNotificationRow;
use super::pool::DbPool;
use super::schema::notifications;

#[derive(Clone)]
pub struct DieselTravelNotifier {
    pool: DbPool,
}

impl DieselTravelNotifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn store(
        &self,
        travel: &Travel,
        receiver: UserNumber,
        kind: TravelNotificationKind,
    ) -> Result<(), TravelNotifierError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, TravelNotifierError::connection))?;
        let content = kind.content(travel.title());

        diesel::insert_into(notifications::table)
            .values(&NewNotificationRow {
                receiver_user_number: receiver.value(),
                travel_number: travel.number().value(),
                kind: kind.as_str(),
                title: kind.title(),
                content: &content,
            })
            .execute(&mut conn)
            .await
            .map_err(|error| {
                map_basic_diesel_error(
                    error,
                    TravelNotifierError::query,
                    TravelNotifierError::connection,
                )
            })?;
        debug!(travel = %travel.number(), %receiver, kind = kind.as_str(), "notification stored");
        Ok(())
    }
}

#[async_trait]
impl TravelNotifier for DieselTravelNotifier {
    async fn notify_host_of_application(&self, travel: &Travel) -> Result<(), TravelNotifierError> {
        self.store(travel, travel.host(), TravelNotificationKind::HostApplication)
            .await
    }

    async fn notify_applicant_of_submission(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError> {
        self.store(travel, applicant, TravelNotificationKind::ApplicantSubmission)
            .await
    }

    async fn notify_accepted(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError> {
        self.store(travel, applicant, TravelNotificationKind::Accepted)
            .await
    }

    async fn notify_rejected(
        &self,
        travel: &Travel,
        applicant: UserNumber,
    ) -> Result<(), TravelNotifierError> {
        self.store(travel, applicant, TravelNotificationKind::Rejected)
            .await
    }
}
