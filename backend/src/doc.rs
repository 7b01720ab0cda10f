//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request/response schemas and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::companions::CompanionResponse;
use crate::inbound::http::enrollments::EnrollmentRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::travel_enrollments::{
    LastViewedBody, TravelEnrollmentItem, TravelEnrollmentsResponse,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Travel companion backend API",
        description = "Enrollment workflow for hosted travels: apply, withdraw, accept and reject.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::enrollments::create_enrollment,
        crate::inbound::http::enrollments::delete_enrollment,
        crate::inbound::http::enrollments::accept_enrollment,
        crate::inbound::http::enrollments::reject_enrollment,
        crate::inbound::http::travel_enrollments::list_travel_enrollments,
        crate::inbound::http::travel_enrollments::count_travel_enrollments,
        crate::inbound::http::travel_enrollments::get_enrollments_last_viewed,
        crate::inbound::http::travel_enrollments::update_enrollments_last_viewed,
        crate::inbound::http::companions::list_companions,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        EnrollmentRequest,
        TravelEnrollmentsResponse,
        TravelEnrollmentItem,
        LastViewedBody,
        CompanionResponse,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "enrollments", description = "Requests to join a travel and host decisions"),
        (name = "travels", description = "Per-travel enrollment and companion views"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
