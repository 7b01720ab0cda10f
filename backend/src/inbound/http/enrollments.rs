//! Enrollment endpoints.
//!
//! ```text
//! POST   /api/enrollment {"travelNumber":1,"message":"hi"}
//! DELETE /api/enrollment/{enrollmentNumber}
//! PUT    /api/enrollment/{enrollmentNumber}/acceptance
//! PUT    /api/enrollment/{enrollmentNumber}/rejection
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EnrollmentNumber;
use crate::domain::ports::{
    CreateEnrollmentRequest, DeleteEnrollmentRequest, EnrollmentDecisionRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_enrollment_message, require_travel_number};

pub(crate) const ENROLLMENT_COMPLETED: &str = "Travel enrollment completed";
pub(crate) const ENROLLMENT_ACCEPTED: &str = "Enrollment accepted";
pub(crate) const ENROLLMENT_REJECTED: &str = "Enrollment rejected";

/// Request body for `POST /api/enrollment`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    /// Travel to join.
    #[schema(example = 1)]
    pub travel_number: Option<i32>,
    /// Optional note to the host, at most 1000 characters.
    #[schema(example = "I can drive")]
    pub message: Option<String>,
}

fn text(mut builder: actix_web::HttpResponseBuilder, body: &'static str) -> HttpResponse {
    builder.content_type(ContentType::plaintext()).body(body)
}

/// Apply to join a travel.
#[utoipa::path(
    post,
    path = "/api/enrollment",
    request_body = EnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request or travel not open", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Travel not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "createEnrollment",
    security(("SessionCookie" = []))
)]
#[post("/enrollment")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EnrollmentRequest>,
) -> ApiResult<HttpResponse> {
    let request_user = session.require_user_number()?;
    let EnrollmentRequest {
        travel_number,
        message,
    } = payload.into_inner();
    let request = CreateEnrollmentRequest {
        travel_number: require_travel_number(travel_number)?,
        message: parse_enrollment_message(message)?,
        request_user,
    };

    state.enrollments.create(request).await?;
    Ok(text(HttpResponse::Created(), ENROLLMENT_COMPLETED))
}

/// Withdraw an enrollment.
#[utoipa::path(
    delete,
    path = "/api/enrollment/{enrollment_number}",
    params(("enrollment_number" = i64, Path, description = "Enrollment number")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the applicant", body = ErrorSchema),
        (status = 404, description = "Enrollment not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "deleteEnrollment",
    security(("SessionCookie" = []))
)]
#[delete("/enrollment/{enrollment_number}")]
pub async fn delete_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let request_user = session.require_user_number()?;
    state
        .enrollments
        .delete(DeleteEnrollmentRequest {
            enrollment_number: EnrollmentNumber::new(path.into_inner()),
            request_user,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Accept an enrollment; the applicant becomes a companion.
#[utoipa::path(
    put,
    path = "/api/enrollment/{enrollment_number}/acceptance",
    params(("enrollment_number" = i64, Path, description = "Enrollment number")),
    responses(
        (status = 200, description = "Enrollment accepted", body = String, content_type = "text/plain"),
        (status = 400, description = "Recruitment closed or enrollment already resolved", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the travel host", body = ErrorSchema),
        (status = 404, description = "Enrollment or travel not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "acceptEnrollment",
    security(("SessionCookie" = []))
)]
#[put("/enrollment/{enrollment_number}/acceptance")]
pub async fn accept_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let request_user = session.require_user_number()?;
    state
        .enrollments
        .accept(EnrollmentDecisionRequest {
            enrollment_number: EnrollmentNumber::new(path.into_inner()),
            request_user,
        })
        .await?;
    Ok(text(HttpResponse::Ok(), ENROLLMENT_ACCEPTED))
}

/// Reject an enrollment.
#[utoipa::path(
    put,
    path = "/api/enrollment/{enrollment_number}/rejection",
    params(("enrollment_number" = i64, Path, description = "Enrollment number")),
    responses(
        (status = 200, description = "Enrollment rejected", body = String, content_type = "text/plain"),
        (status = 400, description = "Enrollment already resolved", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the travel host", body = ErrorSchema),
        (status = 404, description = "Enrollment or travel not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "rejectEnrollment",
    security(("SessionCookie" = []))
)]
#[put("/enrollment/{enrollment_number}/rejection")]
pub async fn reject_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let request_user = session.require_user_number()?;
    state
        .enrollments
        .reject(EnrollmentDecisionRequest {
            enrollment_number: EnrollmentNumber::new(path.into_inner()),
            request_user,
        })
        .await?;
    Ok(text(HttpResponse::Ok(), ENROLLMENT_REJECTED))
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
