//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CompanionQuery, EnrollmentCommand, EnrollmentQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub enrollments: Arc<dyn EnrollmentCommand>,
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
    pub companions: Arc<dyn CompanionQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use companion_backend::domain::ports::{
    ///     FixtureCompanionRepository, FixtureEnrollmentRepository, FixtureLoginService,
    ///     FixtureTravelNotifier, FixtureTravelRepository,
    /// };
    /// use companion_backend::domain::{CompanionQueryService, EnrollmentService};
    /// use companion_backend::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(EnrollmentService::new(
    ///     Arc::new(FixtureTravelRepository),
    ///     Arc::new(FixtureEnrollmentRepository),
    ///     Arc::new(FixtureCompanionRepository),
    ///     Arc::new(FixtureTravelNotifier),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let companions = Arc::new(CompanionQueryService::new(
    ///     Arc::new(FixtureTravelRepository),
    ///     Arc::new(FixtureCompanionRepository),
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service, companions);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        enrollments: Arc<dyn EnrollmentCommand>,
        enrollments_query: Arc<dyn EnrollmentQuery>,
        companions: Arc<dyn CompanionQuery>,
    ) -> Self {
        Self {
            login,
            enrollments,
            enrollments_query,
            companions,
        }
    }
}
