//! Port for reading travels and recording host-side markers on them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Travel, TravelDraft, TravelNumber, TravelStatus, UserNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by travel repository adapters.
    pub enum TravelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "travel repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "travel repository query failed: {message}",
    }
}

/// Travel lookup used by the enrollment workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelRepository: Send + Sync {
    /// Load a travel snapshot.
    async fn find_by_number(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Option<Travel>, TravelRepositoryError>;

    /// Whether `user_number` hosts travel `travel_number`.
    async fn exists_by_number_and_user_number(
        &self,
        travel_number: TravelNumber,
        user_number: UserNumber,
    ) -> Result<bool, TravelRepositoryError>;

    /// Record when the host last opened the enrollment list.
    async fn update_enrollments_last_viewed_at(
        &self,
        travel_number: TravelNumber,
        viewed_at: DateTime<Utc>,
    ) -> Result<(), TravelRepositoryError>;
}

/// Fixture repository serving a small fixed catalogue of travels.
///
/// Travel 1 is open with room for two, travel 2 is open with room for one
/// and travel 3 is closed. User 1 hosts all of them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTravelRepository;

impl FixtureTravelRepository {
    fn travels() -> Vec<Travel> {
        let Ok(host) = UserNumber::new(1) else {
            return Vec::new();
        };
        [
            (1, "Jeju in spring", 2, TravelStatus::InProgress),
            (2, "Busan night market", 1, TravelStatus::InProgress),
            (3, "Seoraksan hike", 4, TravelStatus::Closed),
        ]
        .into_iter()
        .map(|(number, title, max_person, status)| {
            Travel::new(TravelDraft {
                number: TravelNumber::new(number),
                host,
                title: title.to_owned(),
                max_person,
                status,
                enrollments_last_viewed_at: None,
            })
        })
        .collect()
    }
}

#[async_trait]
impl TravelRepository for FixtureTravelRepository {
    async fn find_by_number(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Option<Travel>, TravelRepositoryError> {
        Ok(Self::travels()
            .into_iter()
            .find(|travel| travel.number() == travel_number))
    }

    async fn exists_by_number_and_user_number(
        &self,
        travel_number: TravelNumber,
        user_number: UserNumber,
    ) -> Result<bool, TravelRepositoryError> {
        Ok(Self::travels().iter().any(|travel| {
            travel.number() == travel_number && travel.is_travel_host_user(user_number)
        }))
    }

    async fn update_enrollments_last_viewed_at(
        &self,
        _travel_number: TravelNumber,
        _viewed_at: DateTime<Utc>,
    ) -> Result<(), TravelRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, Some(TravelStatus::InProgress))]
    #[case(3, Some(TravelStatus::Closed))]
    #[case(99, None)]
    #[tokio::test]
    async fn fixture_serves_known_travels(
        #[case] number: i32,
        #[case] expected: Option<TravelStatus>,
    ) {
        let found = FixtureTravelRepository
            .find_by_number(TravelNumber::new(number))
            .await
            .expect("fixture lookup succeeds");
        assert_eq!(found.map(|travel| travel.status()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_host_check_matches_host() {
        let repo = FixtureTravelRepository;
        let host = UserNumber::new(1).expect("valid");
        let guest = UserNumber::new(5).expect("valid");
        assert!(
            repo.exists_by_number_and_user_number(TravelNumber::new(1), host)
                .await
                .expect("lookup")
        );
        assert!(
            !repo
                .exists_by_number_and_user_number(TravelNumber::new(1), guest)
                .await
                .expect("lookup")
        );
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = TravelRepositoryError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "travel repository connection failed: pool exhausted"
        );
    }
}
