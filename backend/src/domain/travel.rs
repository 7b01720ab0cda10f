//! Travel aggregate snapshot and the capacity policy evaluated against it.
//!
//! Travels are created and closed elsewhere; the enrollment workflow only
//! reads them. Capacity decisions use [`TravelCapacity`], which pairs a travel
//! with the companion count loaded alongside it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserNumber;

/// Numeric identifier of a travel posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelNumber(i32);

impl TravelNumber {
    /// Wrap a raw travel number.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw numeric value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TravelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a travel.
///
/// Status only moves forward: `InProgress` to `Closed` or `Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelStatus {
    InProgress,
    Closed,
    Deleted,
}

impl TravelStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for TravelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored travel status is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel status: {0}")]
pub struct ParseTravelStatusError(pub String);

impl FromStr for TravelStatus {
    type Err = ParseTravelStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            "DELETED" => Ok(Self::Deleted),
            other => Err(ParseTravelStatusError(other.to_owned())),
        }
    }
}

/// Travel snapshot as loaded by the enrollment workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Travel {
    number: TravelNumber,
    host: UserNumber,
    title: String,
    max_person: u32,
    status: TravelStatus,
    enrollments_last_viewed_at: Option<DateTime<Utc>>,
}

/// Input for [`Travel::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelDraft {
    pub number: TravelNumber,
    pub host: UserNumber,
    pub title: String,
    pub max_person: u32,
    pub status: TravelStatus,
    pub enrollments_last_viewed_at: Option<DateTime<Utc>>,
}

impl Travel {
    /// Build a travel snapshot.
    ///
    /// # Examples
    /// ```
    /// use companion_backend::domain::{Travel, TravelDraft, TravelNumber, TravelStatus, UserNumber};
    ///
    /// let travel = Travel::new(TravelDraft {
    ///     number: TravelNumber::new(1),
    ///     host: UserNumber::new(1).unwrap(),
    ///     title: "Jeju in spring".to_owned(),
    ///     max_person: 2,
    ///     status: TravelStatus::InProgress,
    ///     enrollments_last_viewed_at: None,
    /// });
    /// assert_eq!(travel.max_person(), 2);
    /// ```
    pub fn new(draft: TravelDraft) -> Self {
        let TravelDraft {
            number,
            host,
            title,
            max_person,
            status,
            enrollments_last_viewed_at,
        } = draft;
        Self {
            number,
            host,
            title,
            max_person,
            status,
            enrollments_last_viewed_at,
        }
    }

    pub fn number(&self) -> TravelNumber {
        self.number
    }

    /// The user who created the travel.
    pub fn host(&self) -> UserNumber {
        self.host
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Capacity ceiling for companions.
    pub fn max_person(&self) -> u32 {
        self.max_person
    }

    pub fn status(&self) -> TravelStatus {
        self.status
    }

    /// When the host last opened the enrollment list.
    pub fn enrollments_last_viewed_at(&self) -> Option<DateTime<Utc>> {
        self.enrollments_last_viewed_at
    }

    /// Whether `user` is the host of this travel.
    pub fn is_travel_host_user(&self, user: UserNumber) -> bool {
        self.host == user
    }

    /// Whether the travel is open for new enrollments.
    pub fn available_for_enroll(&self) -> bool {
        self.status == TravelStatus::InProgress
    }
}

/// Pure capacity predicates over a travel and its current companion count.
///
/// Decisions must use the most recently loaded snapshot; the persistence
/// adapter re-checks capacity under a row lock when a companion is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelCapacity<'a> {
    travel: &'a Travel,
    companion_count: u64,
}

impl<'a> TravelCapacity<'a> {
    /// Pair a travel with its companion count.
    ///
    /// # Examples
    /// ```
    /// use companion_backend::domain::{
    ///     Travel, TravelCapacity, TravelDraft, TravelNumber, TravelStatus, UserNumber,
    /// };
    ///
    /// let travel = Travel::new(TravelDraft {
    ///     number: TravelNumber::new(2),
    ///     host: UserNumber::new(1).unwrap(),
    ///     title: "Busan".to_owned(),
    ///     max_person: 1,
    ///     status: TravelStatus::InProgress,
    ///     enrollments_last_viewed_at: None,
    /// });
    /// let capacity = TravelCapacity::new(&travel, 1);
    /// assert!(capacity.is_full_companion());
    /// assert!(!capacity.available_for_add_companion());
    /// ```
    pub fn new(travel: &'a Travel, companion_count: u64) -> Self {
        Self {
            travel,
            companion_count,
        }
    }

    pub fn travel(&self) -> &'a Travel {
        self.travel
    }

    pub fn companion_count(&self) -> u64 {
        self.companion_count
    }

    /// True while the travel is in progress.
    pub fn available_for_enroll(&self) -> bool {
        self.travel.available_for_enroll()
    }

    /// True while another companion fits under `max_person`.
    pub fn available_for_add_companion(&self) -> bool {
        self.companion_count < u64::from(self.travel.max_person)
    }

    /// True when the companion count has reached `max_person`.
    pub fn is_full_companion(&self) -> bool {
        self.companion_count == u64::from(self.travel.max_person)
    }

    /// Whether `user` hosts the travel.
    pub fn is_travel_host_user(&self, user: UserNumber) -> bool {
        self.travel.is_travel_host_user(user)
    }
}
