//! Cookie session access for handlers.
//!
//! [`SessionContext`] hides the Actix session behind identity-level
//! operations: remember who logged in, recall them on later requests, and
//! forget them on logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EMAIL_KEY: &str = "email";
pub(crate) const NICKNAME_KEY: &str = "nickname";

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        let entries = [
            (USER_ID_KEY, identity.user_id().as_ref()),
            (EMAIL_KEY, identity.email()),
            (NICKNAME_KEY, identity.nickname()),
        ];
        for (key, value) in entries {
            self.0
                .insert(key, value)
                .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        }
        self.0.renew();
        Ok(())
    }

    /// Drop everything the session knows about the caller.
    pub fn clear(&self) {
        self.0.purge();
    }

    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// The identity recorded at login, if the cookie carries a valid one.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let (Some(raw_id), Some(email), Some(nickname)) = (
            self.read(USER_ID_KEY)?,
            self.read(EMAIL_KEY)?,
            self.read(NICKNAME_KEY)?,
        ) else {
            return Ok(None);
        };
        match UserId::new(raw_id) {
            Ok(user_id) => Ok(Some(Identity::from_parts(user_id, email, nickname))),
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// The caller's identity, or `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("Authorization required"))
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
