//! User identity as seen by the enrollment workflow.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserNumber::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// User numbers are positive database identifiers.
    #[error("user number must be positive, got {value}")]
    NonPositive { value: i32 },
}

/// Numeric identifier of a registered user.
///
/// # Examples
/// ```
/// use companion_backend::domain::UserNumber;
///
/// let host = UserNumber::new(1).expect("positive");
/// assert_eq!(host.value(), 1);
/// assert!(UserNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserNumber(i32);

impl UserNumber {
    /// Validate and wrap a raw user number.
    pub fn new(value: i32) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositive { value });
        }
        Ok(Self(value))
    }

    /// Raw numeric value.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for UserNumber {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserNumber> for i32 {
    fn from(value: UserNumber) -> Self {
        value.0
    }
}
