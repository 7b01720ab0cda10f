//! Domain primitives, policies and services for the travel enrollment
//! workflow.
//!
//! Public surface:
//! - [`Travel`] and [`TravelCapacity`]: travel snapshot and the pure capacity
//!   predicates evaluated against it.
//! - [`Enrollment`] and [`transition`]: the request-to-join record and its
//!   status state machine.
//! - [`Companion`]: confirmed membership created by acceptance.
//! - [`EnrollmentService`] and [`CompanionQueryService`]: driving port
//!   implementations.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.

pub mod auth;
pub mod companion;
pub mod companion_service;
pub mod enrollment;
pub mod enrollment_service;
mod enrollment_service_support;
pub mod error;
pub mod notification;
pub mod ports;
pub mod trace_id;
pub mod travel;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::companion::{Companion, CompanionNumber};
pub use self::companion_service::CompanionQueryService;
pub use self::enrollment::{
    ENROLLMENT_MESSAGE_MAX, Enrollment, EnrollmentEvent, EnrollmentMessage,
    EnrollmentMessageError, EnrollmentNumber, EnrollmentStatus, InvalidTransition,
    NewEnrollment, ParseEnrollmentStatusError, transition,
};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode};
pub use self::notification::TravelNotificationKind;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::travel::{
    ParseTravelStatusError, Travel, TravelCapacity, TravelDraft, TravelNumber, TravelStatus,
};
pub use self::user::{UserNumber, UserValidationError};
