//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to turn credentials into an [`Identity`]
//! without knowing how identities are verified.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}

/// Development authenticator.
///
/// Accepts any well-formed e-mail address with the password `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        if credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Identity::from_email(credentials.email())
            .map_err(|_| Error::unauthorized("invalid credentials"))
    }
}
