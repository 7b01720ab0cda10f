//! Enrollment entity and its status state machine.
//!
//! An enrollment is a user's request to join a travel. It starts `Pending`
//! and is resolved exactly once, by acceptance or rejection. Both resolved
//! states are terminal; [`transition`] is the only way to move between
//! states.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TravelNumber, UserNumber};

/// Maximum length of an enrollment message, counted in characters.
pub const ENROLLMENT_MESSAGE_MAX: usize = 1000;

/// Generated identifier of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentNumber(i64);

impl EnrollmentNumber {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EnrollmentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enrollment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Pending,
    Accepted,
    Rejected,
}

impl EnrollmentStatus {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Accepted and rejected enrollments never change again.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored enrollment status is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown enrollment status: {0}")]
pub struct ParseEnrollmentStatusError(pub String);

impl FromStr for EnrollmentStatus {
    type Err = ParseEnrollmentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(ParseEnrollmentStatusError(other.to_owned())),
        }
    }
}

/// Host decision applied to a pending enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrollmentEvent {
    Accept,
    Reject,
}

impl fmt::Display for EnrollmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("accept"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} an enrollment that is already {from}")]
pub struct InvalidTransition {
    pub from: EnrollmentStatus,
    pub event: EnrollmentEvent,
}

/// Apply `event` to `current`.
///
/// # Examples
/// ```
/// use companion_backend::domain::{transition, EnrollmentEvent, EnrollmentStatus};
///
/// assert_eq!(
///     transition(EnrollmentStatus::Pending, EnrollmentEvent::Accept),
///     Ok(EnrollmentStatus::Accepted)
/// );
/// assert!(transition(EnrollmentStatus::Rejected, EnrollmentEvent::Accept).is_err());
/// ```
pub fn transition(
    current: EnrollmentStatus,
    event: EnrollmentEvent,
) -> Result<EnrollmentStatus, InvalidTransition> {
    match (current, event) {
        (EnrollmentStatus::Pending, EnrollmentEvent::Accept) => Ok(EnrollmentStatus::Accepted),
        (EnrollmentStatus::Pending, EnrollmentEvent::Reject) => Ok(EnrollmentStatus::Rejected),
        (from, event) => Err(InvalidTransition { from, event }),
    }
}

/// Validation errors for [`EnrollmentMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentMessageError {
    #[error("message must be at most {max} characters, got {length}")]
    TooLong { max: usize, length: usize },
}

/// Optional note from the applicant to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnrollmentMessage(String);

impl EnrollmentMessage {
    /// Validate the message length.
    pub fn new(value: impl Into<String>) -> Result<Self, EnrollmentMessageError> {
        let value = value.into();
        let length = value.chars().count();
        if length > ENROLLMENT_MESSAGE_MAX {
            return Err(EnrollmentMessageError::TooLong {
                max: ENROLLMENT_MESSAGE_MAX,
                length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EnrollmentMessage {
    type Error = EnrollmentMessageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EnrollmentMessage> for String {
    fn from(value: EnrollmentMessage) -> Self {
        value.0
    }
}

/// Enrollment about to be persisted; the store assigns the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub travel_number: TravelNumber,
    pub applicant: UserNumber,
    pub message: Option<EnrollmentMessage>,
    pub created_at: DateTime<Utc>,
}

impl NewEnrollment {
    /// Pending enrollment stamped with `created_at`.
    pub fn pending(
        travel_number: TravelNumber,
        applicant: UserNumber,
        message: Option<EnrollmentMessage>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            travel_number,
            applicant,
            message,
            created_at,
        }
    }
}

/// Persisted enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    number: EnrollmentNumber,
    travel_number: TravelNumber,
    applicant: UserNumber,
    message: Option<EnrollmentMessage>,
    status: EnrollmentStatus,
    created_at: DateTime<Utc>,
}

impl Enrollment {
    /// Rehydrate a stored enrollment.
    pub fn from_parts(
        number: EnrollmentNumber,
        new: NewEnrollment,
        status: EnrollmentStatus,
    ) -> Self {
        let NewEnrollment {
            travel_number,
            applicant,
            message,
            created_at,
        } = new;
        Self {
            number,
            travel_number,
            applicant,
            message,
            status,
            created_at,
        }
    }

    pub fn number(&self) -> EnrollmentNumber {
        self.number
    }

    pub fn travel_number(&self) -> TravelNumber {
        self.travel_number
    }

    /// The user who asked to join.
    pub fn applicant(&self) -> UserNumber {
        self.applicant
    }

    pub fn message(&self) -> Option<&EnrollmentMessage> {
        self.message.as_ref()
    }

    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` submitted this enrollment.
    pub fn is_owned_by(&self, user: UserNumber) -> bool {
        self.applicant == user
    }

    /// Target status for `event`, without mutating `self`.
    pub fn next_status(&self, event: EnrollmentEvent) -> Result<EnrollmentStatus, InvalidTransition> {
        transition(self.status, event)
    }
}
