//! Companion listing service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::enrollment_service_support::{
    map_companion_error, map_travel_error, travel_not_found,
};
use crate::domain::ports::{
    CompanionPayload, CompanionQuery, CompanionRepository, TravelRepository,
};
use crate::domain::{Error, TravelNumber};

/// Service implementing [`CompanionQuery`].
#[derive(Clone)]
pub struct CompanionQueryService<T, C> {
    travels: Arc<T>,
    companions: Arc<C>,
}

impl<T, C> CompanionQueryService<T, C> {
    pub fn new(travels: Arc<T>, companions: Arc<C>) -> Self {
        Self {
            travels,
            companions,
        }
    }
}

#[async_trait]
impl<T, C> CompanionQuery for CompanionQueryService<T, C>
where
    T: TravelRepository,
    C: CompanionRepository,
{
    async fn list_companions(
        &self,
        travel_number: TravelNumber,
    ) -> Result<Vec<CompanionPayload>, Error> {
        self.travels
            .find_by_number(travel_number)
            .await
            .map_err(map_travel_error)?
            .ok_or_else(|| travel_not_found(travel_number))?;

        let companions = self
            .companions
            .list_by_travel(travel_number)
            .await
            .map_err(map_companion_error)?;
        Ok(companions.into_iter().map(Into::into).collect())
    }
}
