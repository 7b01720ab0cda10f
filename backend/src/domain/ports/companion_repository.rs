//! Port for reading confirmed companions.
//!
//! Companions are written only through
//! [`EnrollmentRepository::record_acceptance`](super::EnrollmentRepository::record_acceptance).

use async_trait::async_trait;

use crate::domain::{Companion, TravelNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by companion repository adapters.
    pub enum CompanionRepositoryError {
        Connection { message: String } => "companion repository connection failed: {message}",
        Query { message: String } => "companion repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanionRepository: Send + Sync {
    /// Number of companions currently attached to a travel.
    async fn count_by_travel(
        &self,
        travel_number: TravelNumber,
    ) -> Result<u64, CompanionRepositoryError>;

    /// Companions of a travel in insertion order.
    async fn list_by_travel(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Vec<Companion>, CompanionRepositoryError>;
}

/// Fixture repository reporting no companions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCompanionRepository;

#[async_trait]
impl CompanionRepository for FixtureCompanionRepository {
    async fn count_by_travel(
        &self,
        _travel_number: TravelNumber,
    ) -> Result<u64, CompanionRepositoryError> {
        Ok(0)
    }

    async fn list_by_travel(
        &self,
        _travel_number: TravelNumber,
    ) -> Result<Vec<Companion>, CompanionRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_empty_travel() {
        let repo = FixtureCompanionRepository;
        let travel = TravelNumber::new(1);
        assert_eq!(repo.count_by_travel(travel).await.expect("count"), 0);
        assert!(repo.list_by_travel(travel).await.expect("list").is_empty());
    }
}
