//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Handlers deal with the authenticated [`UserNumber`] only; how it is kept
//! in the cookie is private to this module.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserNumber};

pub(crate) const USER_NUMBER_KEY: &str = "user_number";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's number in the session cookie.
    pub fn persist_user(&self, user: UserNumber) -> Result<(), Error> {
        self.0
            .insert(USER_NUMBER_KEY, user.value())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user number from the session, if present.
    ///
    /// Values that are not valid user numbers are treated as absent.
    pub fn user_number(&self) -> Result<Option<UserNumber>, Error> {
        let raw = match self.0.get::<i32>(USER_NUMBER_KEY) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!("unreadable user number in session cookie: {error}");
                return Ok(None);
            }
        };
        match raw.map(UserNumber::new).transpose() {
            Ok(user) => Ok(user),
            Err(error) => {
                tracing::warn!("invalid user number in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user or return `401 Unauthorized`.
    pub fn require_user_number(&self) -> Result<UserNumber, Error> {
        self.user_number()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/require",
                web::get().to(|session: SessionContext| async move {
                    let user = session.require_user_number()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(user.to_string()))
                }),
            )
    }

    async fn require_with_cookie<S>(app: &S, cookie: actix_web::cookie::Cookie<'static>) -> StatusCode
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res = test::call_service(
            app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        res.status()
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn round_trips_user_number() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                session.persist_user(UserNumber::new(5).expect("valid"))?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "5");
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_number_is_unauthorised() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-zero",
                    web::get().to(|session: Session| async move {
                        session.insert(USER_NUMBER_KEY, 0).expect("set user number");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/set-text",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_NUMBER_KEY, "not-a-number")
                            .expect("set user number");
                        HttpResponse::Ok()
                    }),
                ),
        )
        .await;

        for uri in ["/set-zero", "/set-text"] {
            let set_res =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            let cookie = session_cookie(&set_res);
            assert_eq!(
                require_with_cookie(&app, cookie).await,
                StatusCode::UNAUTHORIZED,
                "{uri}"
            );
        }
    }
}
