//! Driving port listing the confirmed companions of a travel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Companion, Error, TravelNumber, UserNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionPayload {
    pub user_number: UserNumber,
}

impl From<Companion> for CompanionPayload {
    fn from(value: Companion) -> Self {
        Self {
            user_number: value.user_number,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanionQuery: Send + Sync {
    /// Companions of an existing travel.
    async fn list_companions(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Vec<CompanionPayload>, Error>;
}
