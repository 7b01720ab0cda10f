//! Confirmed travel membership.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TravelNumber, UserNumber};

/// Generated identifier of a companion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanionNumber(i64);

impl CompanionNumber {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CompanionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user confirmed as a member of a travel.
///
/// Companions only come into existence when an enrollment is accepted and
/// are unique per `(travel_number, user_number)`; the store enforces the
/// uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Companion {
    pub number: CompanionNumber,
    pub travel_number: TravelNumber,
    pub user_number: UserNumber,
}
