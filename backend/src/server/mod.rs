//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::build_metrics;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use companion_backend::Trace;
#[cfg(debug_assertions)]
use companion_backend::doc::ApiDoc;
use companion_backend::inbound::http::companions::list_companions;
use companion_backend::inbound::http::enrollments::{
    accept_enrollment, create_enrollment, delete_enrollment, reject_enrollment,
};
use companion_backend::inbound::http::health::{HealthState, live, ready};
use companion_backend::inbound::http::state::HttpState;
use companion_backend::inbound::http::travel_enrollments::{
    count_travel_enrollments, get_enrollments_last_viewed, list_travel_enrollments,
    update_enrollments_last_viewed,
};
use companion_backend::inbound::http::users::login;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(login)
        .service(create_enrollment)
        .service(delete_enrollment)
        .service(accept_enrollment)
        .service(reject_enrollment)
        .service(get_enrollments_last_viewed)
        .service(update_enrollments_last_viewed)
        .service(list_travel_enrollments)
        .service(count_travel_enrollments)
        .service(list_companions);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use companion_backend::domain::TRACE_ID_HEADER;
    use rstest::rstest;
    use serde_json::json;

    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(&ServerConfig::new(
                companion_backend::inbound::http::session_config::SessionSettings {
                    key: Key::generate(),
                    cookie_secure: false,
                    same_site: SameSite::Lax,
                },
                "127.0.0.1:0".parse().expect("socket address"),
            )),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/api/travel/1/enrollmentCount")]
    #[case("/api/travel/1/companions")]
    #[case("/api/travel/1/enrollments/last-viewed")]
    #[actix_web::test]
    async fn public_routes_are_mounted(#[case] uri: &str) {
        let app = actix_test::init_service(build_app(deps())).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn enrollment_requires_a_session() {
        let app = actix_test::init_service(build_app(deps())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/enrollment")
                .set_json(json!({ "travelNumber": 1 }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn guest_can_enroll_after_login() {
        let app = actix_test::init_service(build_app(deps())).await;
        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "guest", "password": "password" }))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/enrollment")
                .cookie(cookie)
                .set_json(json!({ "travelNumber": 1, "message": "count me in" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), b"Travel enrollment completed");
    }
}
