//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::test as actix_test;
use mockable::DefaultClock;

use crate::domain::ports::{
    FixtureCompanionRepository, FixtureEnrollmentRepository, FixtureLoginService,
    FixtureTravelNotifier, FixtureTravelRepository,
};
use crate::domain::{CompanionQueryService, EnrollmentService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::LoginRequest;

/// Fixture login for the host of every fixture travel.
pub const HOST_LOGIN: &str = "host";
/// Fixture login for a user who hosts nothing.
pub const GUEST_LOGIN: &str = "guest";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state wired to the fixture adapters. Tests replace single ports.
pub fn fixture_state() -> HttpState {
    let enrollments = Arc::new(EnrollmentService::new(
        Arc::new(FixtureTravelRepository),
        Arc::new(FixtureEnrollmentRepository),
        Arc::new(FixtureCompanionRepository),
        Arc::new(FixtureTravelNotifier),
        Arc::new(DefaultClock),
    ));
    let companions = Arc::new(CompanionQueryService::new(
        Arc::new(FixtureTravelRepository),
        Arc::new(FixtureCompanionRepository),
    ));
    HttpState::new(
        Arc::new(FixtureLoginService),
        enrollments.clone(),
        enrollments,
        companions,
    )
}

/// Log in through `POST /api/login` and return the session cookie.
pub async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(&LoginRequest {
            username: username.into(),
            password: "password".into(),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success(), "login as {username}");
    login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
