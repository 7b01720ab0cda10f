//! Companion listing.
//!
//! ```text
//! GET /api/travel/{travelNumber}/companions
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TravelNumber;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    #[schema(example = 5)]
    pub user_number: i32,
}

/// Confirmed companions of a travel.
#[utoipa::path(
    get,
    path = "/api/travel/{travel_number}/companions",
    params(("travel_number" = i32, Path, description = "Travel number")),
    responses(
        (status = 200, description = "Companions", body = [CompanionResponse]),
        (status = 404, description = "Travel not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["companions"],
    operation_id = "listCompanions",
    security([])
)]
#[get("/travel/{travel_number}/companions")]
pub async fn list_companions(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<CompanionResponse>>> {
    let companions = state
        .companions
        .list_companions(TravelNumber::new(path.into_inner()))
        .await?;
    Ok(web::Json(
        companions
            .into_iter()
            .map(|companion| CompanionResponse {
                user_number: companion.user_number.value(),
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{CompanionPayload, MockCompanionQuery};
    use crate::domain::{Error, UserNumber};
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};

    fn test_app(
        query: MockCompanionQuery,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut state = fixture_state();
        state.companions = Arc::new(query);
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(web::scope("/api").service(list_companions))
    }

    #[actix_web::test]
    async fn lists_companion_user_numbers() {
        let mut query = MockCompanionQuery::new();
        query
            .expect_list_companions()
            .withf(|travel| *travel == TravelNumber::new(1))
            .return_once(|_| {
                Ok(vec![
                    CompanionPayload {
                        user_number: UserNumber::new(5).expect("valid"),
                    },
                    CompanionPayload {
                        user_number: UserNumber::new(6).expect("valid"),
                    },
                ])
            });
        let app = actix_test::init_service(test_app(query)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/travel/1/companions")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!([{"userNumber": 5}, {"userNumber": 6}]));
    }

    #[actix_web::test]
    async fn unknown_travel_is_not_found() {
        let mut query = MockCompanionQuery::new();
        query
            .expect_list_companions()
            .return_once(|_| Err(Error::not_found("travel 42 does not exist")));
        let app = actix_test::init_service(test_app(query)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/travel/42/companions")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
