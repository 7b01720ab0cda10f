//! Builders for the HTTP state: Diesel adapters when a pool is configured,
//! fixture ports otherwise.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use companion_backend::domain::ports::{
    CompanionQuery, CompanionRepository, EnrollmentCommand, EnrollmentQuery,
    EnrollmentRepository, FixtureCompanionRepository, FixtureEnrollmentRepository,
    FixtureLoginService, FixtureTravelNotifier, FixtureTravelRepository, TravelNotifier,
    TravelRepository,
};
use companion_backend::domain::{CompanionQueryService, EnrollmentService};
use companion_backend::inbound::http::state::HttpState;
use companion_backend::outbound::persistence::{
    DbPool, DieselCompanionRepository, DieselEnrollmentRepository, DieselTravelNotifier,
    DieselTravelRepository,
};

use super::ServerConfig;

/// Driven adapters the enrollment services are built over.
struct Adapters<T, E, C, N> {
    travels: Arc<T>,
    enrollments: Arc<E>,
    companions: Arc<C>,
    notifier: Arc<N>,
}

/// Driving ports handed to the HTTP layer.
struct EnrollmentPorts {
    enrollments: Arc<dyn EnrollmentCommand>,
    enrollments_query: Arc<dyn EnrollmentQuery>,
    companions: Arc<dyn CompanionQuery>,
}

fn enrollment_ports<T, E, C, N>(adapters: Adapters<T, E, C, N>) -> EnrollmentPorts
where
    T: TravelRepository + 'static,
    E: EnrollmentRepository + 'static,
    C: CompanionRepository + 'static,
    N: TravelNotifier + 'static,
{
    let Adapters {
        travels,
        enrollments,
        companions,
        notifier,
    } = adapters;
    let service = Arc::new(EnrollmentService::new(
        travels.clone(),
        enrollments,
        companions.clone(),
        notifier,
        Arc::new(DefaultClock),
    ));
    EnrollmentPorts {
        enrollments: service.clone(),
        enrollments_query: service,
        companions: Arc::new(CompanionQueryService::new(travels, companions)),
    }
}

fn diesel_adapters(
    pool: &DbPool,
) -> Adapters<
    DieselTravelRepository,
    DieselEnrollmentRepository,
    DieselCompanionRepository,
    DieselTravelNotifier,
> {
    Adapters {
        travels: Arc::new(DieselTravelRepository::new(pool.clone())),
        enrollments: Arc::new(DieselEnrollmentRepository::new(pool.clone())),
        companions: Arc::new(DieselCompanionRepository::new(pool.clone())),
        notifier: Arc::new(DieselTravelNotifier::new(pool.clone())),
    }
}

fn fixture_adapters() -> Adapters<
    FixtureTravelRepository,
    FixtureEnrollmentRepository,
    FixtureCompanionRepository,
    FixtureTravelNotifier,
> {
    Adapters {
        travels: Arc::new(FixtureTravelRepository),
        enrollments: Arc::new(FixtureEnrollmentRepository),
        companions: Arc::new(FixtureCompanionRepository),
        notifier: Arc::new(FixtureTravelNotifier),
    }
}

/// Pick Diesel-backed ports when a pool is present.
fn build_enrollment_ports<Pool>(
    pool: &Option<Pool>,
    make_ports: impl FnOnce(&Pool) -> EnrollmentPorts,
) -> EnrollmentPorts {
    match pool {
        Some(pool) => make_ports(pool),
        None => enrollment_ports(fixture_adapters()),
    }
}

/// Build the shared HTTP state from the configured ports.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = build_enrollment_ports(&config.db_pool, |pool| {
        enrollment_ports(diesel_adapters(pool))
    });

    // Credentials are not persisted; login stays on the fixture accounts.
    web::Data::new(HttpState::new(
        Arc::new(FixtureLoginService),
        ports.enrollments,
        ports.enrollments_query,
        ports.companions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use companion_backend::domain::ports::{ListTravelEnrollmentsRequest, TravelRepositoryError};
    use companion_backend::domain::{ErrorCode, Travel, TravelNumber, UserNumber};
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    /// Travel repository that knows no travels, to tell it apart from the fixture.
    struct EmptyTravels;

    #[async_trait]
    impl TravelRepository for EmptyTravels {
        async fn find_by_number(
            &self,
            _travel_number: TravelNumber,
        ) -> Result<Option<Travel>, TravelRepositoryError> {
            Ok(None)
        }

        async fn exists_by_number_and_user_number(
            &self,
            _travel_number: TravelNumber,
            _user_number: UserNumber,
        ) -> Result<bool, TravelRepositoryError> {
            Ok(false)
        }

        async fn update_enrollments_last_viewed_at(
            &self,
            _travel_number: TravelNumber,
            _viewed_at: DateTime<Utc>,
        ) -> Result<(), TravelRepositoryError> {
            Ok(())
        }
    }

    fn stub_ports(_pool: &()) -> EnrollmentPorts {
        enrollment_ports(Adapters {
            travels: Arc::new(EmptyTravels),
            enrollments: Arc::new(FixtureEnrollmentRepository),
            companions: Arc::new(FixtureCompanionRepository),
            notifier: Arc::new(FixtureTravelNotifier),
        })
    }

    fn host() -> UserNumber {
        UserNumber::new(1).expect("valid user number")
    }

    #[rstest]
    #[tokio::test]
    async fn pool_present_selects_pool_backed_ports() {
        let ports = build_enrollment_ports(&Some(()), stub_ports);

        let err = ports
            .companions
            .list_companions(TravelNumber::new(1))
            .await
            .expect_err("stub knows no travels");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn pool_absent_keeps_fixture_ports() {
        let ports = build_enrollment_ports::<()>(&None, stub_ports);

        ports
            .companions
            .list_companions(TravelNumber::new(1))
            .await
            .expect("fixture travel 1 exists");
        ports
            .enrollments_query
            .find_enrollments_by_travel_number(ListTravelEnrollmentsRequest {
                travel_number: TravelNumber::new(1),
                request_user: host(),
            })
            .await
            .expect("fixture host may list enrollments");
    }
}
