//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only ever talk to
//! driving ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnnouncementQuery, ConferenceCommand, ConferenceQuery, LoginService, ProfileCommand,
    ProfileQuery, RegistrationCommand, SessionCommand, SessionQuery, WishlistCommand,
    WishlistQuery,
};

/// Every port implementation the HTTP handlers depend on.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_updates: Arc<dyn ProfileCommand>,
    pub conferences: Arc<dyn ConferenceQuery>,
    pub conference_updates: Arc<dyn ConferenceCommand>,
    pub registrations: Arc<dyn RegistrationCommand>,
    pub sessions: Arc<dyn SessionQuery>,
    pub session_updates: Arc<dyn SessionCommand>,
    pub wishlist: Arc<dyn WishlistQuery>,
    pub wishlist_updates: Arc<dyn WishlistCommand>,
    pub announcements: Arc<dyn AnnouncementQuery>,
}
