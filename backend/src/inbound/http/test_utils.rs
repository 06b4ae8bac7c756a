//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, post, test};

use crate::domain::Identity;
use crate::domain::ports::{
    MockAnnouncementQuery, MockConferenceCommand, MockConferenceQuery, MockLoginService,
    MockProfileCommand, MockProfileQuery, MockRegistrationCommand, MockSessionCommand,
    MockSessionQuery, MockWishlistCommand, MockWishlistQuery,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub const TEST_EMAIL: &str = "ada@example.com";

/// Build a session middleware configured for tests.
///
/// Each call generates a fresh key, names the cookie `session` and drops
/// the `Secure` flag so plain HTTP test requests keep it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

pub fn test_identity() -> Identity {
    Identity::from_email(TEST_EMAIL).expect("test identity")
}

/// Log [`test_identity`] in without going through a login service.
#[post("/test-login")]
pub async fn test_login(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_identity(&test_identity())?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn test_login_request() -> test::TestRequest {
    test::TestRequest::post().uri("/test-login")
}

/// One mock per driving port; tests set expectations on the ports a
/// handler touches and leave the rest untouched.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub profiles: MockProfileQuery,
    pub profile_updates: MockProfileCommand,
    pub conferences: MockConferenceQuery,
    pub conference_updates: MockConferenceCommand,
    pub registrations: MockRegistrationCommand,
    pub sessions: MockSessionQuery,
    pub session_updates: MockSessionCommand,
    pub wishlist: MockWishlistQuery,
    pub wishlist_updates: MockWishlistCommand,
    pub announcements: MockAnnouncementQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            profiles: Arc::new(self.profiles),
            profile_updates: Arc::new(self.profile_updates),
            conferences: Arc::new(self.conferences),
            conference_updates: Arc::new(self.conference_updates),
            registrations: Arc::new(self.registrations),
            sessions: Arc::new(self.sessions),
            session_updates: Arc::new(self.session_updates),
            wishlist: Arc::new(self.wishlist),
            wishlist_updates: Arc::new(self.wishlist_updates),
            announcements: Arc::new(self.announcements),
        }
    }
}
