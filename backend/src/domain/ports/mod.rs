//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TravelNotifier`]) are implemented by
//! outbound adapters. Driving ports ([`EnrollmentCommand`],
//! [`EnrollmentQuery`], [`CompanionQuery`], [`LoginService`]) are what the
//! HTTP adapter calls.

mod macros;
pub(crate) use macros::define_port_error;

mod companion_query;
mod companion_repository;
mod enrollment_command;
mod enrollment_query;
mod enrollment_repository;
mod login_service;
mod travel_notifier;
mod travel_repository;

#[cfg(test)]
pub use companion_query::MockCompanionQuery;
pub use companion_query::{CompanionPayload, CompanionQuery};
#[cfg(test)]
pub use companion_repository::MockCompanionRepository;
pub use companion_repository::{
    CompanionRepository, CompanionRepositoryError, FixtureCompanionRepository,
};
#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
pub use enrollment_command::{
    CreateEnrollmentRequest, DeleteEnrollmentRequest, EnrollmentCommand,
    EnrollmentDecisionRequest, EnrollmentPayload, MarkEnrollmentsViewedRequest,
};
#[cfg(test)]
pub use enrollment_query::MockEnrollmentQuery;
pub use enrollment_query::{
    EnrollmentQuery, ListTravelEnrollmentsRequest, ListTravelEnrollmentsResponse,
};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{
    AcceptanceRecord, EnrollmentRepository, EnrollmentRepositoryError,
    FixtureEnrollmentRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use travel_notifier::MockTravelNotifier;
pub use travel_notifier::{FixtureTravelNotifier, TravelNotifier, TravelNotifierError};
#[cfg(test)]
pub use travel_repository::MockTravelRepository;
pub use travel_repository::{FixtureTravelRepository, TravelRepository, TravelRepositoryError};
