//! Travel-scoped enrollment reads and the host's "last viewed" marker.
//!
//! ```text
//! GET /api/travel/{travelNumber}/enrollments
//! GET /api/travel/{travelNumber}/enrollmentCount
//! GET /api/travel/{travelNumber}/enrollments/last-viewed
//! PUT /api/travel/{travelNumber}/enrollments/last-viewed {"lastViewedAt":"2026-05-04T10:00:00Z"}
//! ```

use actix_web::{HttpResponse, get, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    EnrollmentPayload, ListTravelEnrollmentsRequest, MarkEnrollmentsViewedRequest,
};
use crate::domain::TravelNumber;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    LAST_VIEWED_AT, missing_field_error, parse_rfc3339_timestamp,
};

/// One pending enrollment as shown to the host.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelEnrollmentItem {
    #[schema(example = 12)]
    pub enrollment_number: i64,
    #[schema(example = 5)]
    pub user_number: i32,
    pub message: Option<String>,
    #[schema(example = "PENDING")]
    pub status: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<EnrollmentPayload> for TravelEnrollmentItem {
    fn from(value: EnrollmentPayload) -> Self {
        Self {
            enrollment_number: value.enrollment_number.value(),
            user_number: value.user_number.value(),
            message: value.message,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at,
        }
    }
}

/// Response body for `GET /api/travel/{travelNumber}/enrollments`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelEnrollmentsResponse {
    #[schema(example = 1)]
    pub total_count: u64,
    pub enrollments: Vec<TravelEnrollmentItem>,
}

/// Body of both last-viewed endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastViewedBody {
    /// RFC 3339 timestamp; `null` when the host never opened the list.
    #[schema(example = "2026-05-04T10:00:00Z")]
    pub last_viewed_at: Option<String>,
}

/// List pending enrollments of a travel. Host only.
#[utoipa::path(
    get,
    path = "/api/travel/{travel_number}/enrollments",
    params(("travel_number" = i32, Path, description = "Travel number")),
    responses(
        (status = 200, description = "Pending enrollments, newest first", body = TravelEnrollmentsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the travel host", body = ErrorSchema),
        (status = 404, description = "Travel not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-enrollments"],
    operation_id = "listTravelEnrollments",
    security(("SessionCookie" = []))
)]
#[get("/travel/{travel_number}/enrollments")]
pub async fn list_travel_enrollments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TravelEnrollmentsResponse>> {
    let request_user = session.require_user_number()?;
    let response = state
        .enrollments_query
        .find_enrollments_by_travel_number(ListTravelEnrollmentsRequest {
            travel_number: TravelNumber::new(path.into_inner()),
            request_user,
        })
        .await?;
    Ok(web::Json(TravelEnrollmentsResponse {
        total_count: response.total_count,
        enrollments: response.enrollments.into_iter().map(Into::into).collect(),
    }))
}

/// Count pending enrollments of a travel.
#[utoipa::path(
    get,
    path = "/api/travel/{travel_number}/enrollmentCount",
    params(("travel_number" = i32, Path, description = "Travel number")),
    responses(
        (status = 200, description = "Pending enrollment count", body = u64),
        (status = 404, description = "Travel not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-enrollments"],
    operation_id = "countTravelEnrollments",
    security([])
)]
#[get("/travel/{travel_number}/enrollmentCount")]
pub async fn count_travel_enrollments(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<u64>> {
    let count = state
        .enrollments_query
        .pending_enrollment_count(TravelNumber::new(path.into_inner()))
        .await?;
    Ok(web::Json(count))
}

/// When the host last opened the enrollment list.
#[utoipa::path(
    get,
    path = "/api/travel/{travel_number}/enrollments/last-viewed",
    params(("travel_number" = i32, Path, description = "Travel number")),
    responses(
        (status = 200, description = "Last viewed timestamp", body = LastViewedBody),
        (status = 404, description = "Travel not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-enrollments"],
    operation_id = "getEnrollmentsLastViewed",
    security([])
)]
#[get("/travel/{travel_number}/enrollments/last-viewed")]
pub async fn get_enrollments_last_viewed(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<LastViewedBody>> {
    let viewed = state
        .enrollments_query
        .enrollments_last_viewed_at(TravelNumber::new(path.into_inner()))
        .await?;
    Ok(web::Json(LastViewedBody {
        last_viewed_at: viewed.map(|at| at.to_rfc3339()),
    }))
}

/// Move the host's "last viewed" marker.
#[utoipa::path(
    put,
    path = "/api/travel/{travel_number}/enrollments/last-viewed",
    params(("travel_number" = i32, Path, description = "Travel number")),
    request_body = LastViewedBody,
    responses(
        (status = 200, description = "Marker updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the travel host", body = ErrorSchema),
        (status = 404, description = "Travel not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-enrollments"],
    operation_id = "updateEnrollmentsLastViewed",
    security(("SessionCookie" = []))
)]
#[put("/travel/{travel_number}/enrollments/last-viewed")]
pub async fn update_enrollments_last_viewed(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<LastViewedBody>,
) -> ApiResult<HttpResponse> {
    let request_user = session.require_user_number()?;
    let raw = payload
        .into_inner()
        .last_viewed_at
        .ok_or_else(|| missing_field_error(LAST_VIEWED_AT))?;
    let viewed_at = parse_rfc3339_timestamp(&raw, LAST_VIEWED_AT)?;

    state
        .enrollments
        .mark_enrollments_viewed(MarkEnrollmentsViewedRequest {
            travel_number: TravelNumber::new(path.into_inner()),
            request_user,
            viewed_at,
        })
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "travel_enrollments_tests.rs"]
mod tests;
