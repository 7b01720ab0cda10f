//! Driving port for session login.
//!
//! Account management lives outside this service; the port only turns
//! credentials into the user number stored in the session.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserNumber};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user number.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserNumber, Error>;
}

/// In-memory authenticator for development.
///
/// `host` / `password` signs in as user 1, the host of every fixture travel;
/// `guest` / `password` signs in as user 5.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserNumber, Error> {
        let raw = match (credentials.username(), credentials.password()) {
            ("host", "password") => 1,
            ("guest", "password") => 5,
            _ => return Err(Error::unauthorized("invalid credentials")),
        };
        UserNumber::new(raw)
            .map_err(|err| Error::internal(format!("invalid fixture user number: {err}")))
    }
}
