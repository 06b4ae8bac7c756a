//! OpenAPI document for the conference API.
//!
//! [`ApiDoc`] collects every handler's `#[utoipa::path]` annotation plus the
//! error schemas from [`crate::inbound::http::schemas`]. Swagger UI serves it
//! in debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::forms::{
    BooleanMessage, ConferenceForm, ConferenceList, ConferenceQueryFilter, ConferenceQueryForm,
    ConferenceRequest, ProfileForm, ProfileMiniForm, SessionForm, SessionList, SessionRequest,
    StringMessage, WishlistRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie security scheme.
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
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Conference backend API",
        description = "Conferences, registrations, sessions and wishlists behind a session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::conferences::create_conference,
        crate::inbound::http::conferences::get_conference,
        crate::inbound::http::conferences::update_conference,
        crate::inbound::http::conferences::get_conferences_created,
        crate::inbound::http::conferences::query_conferences,
        crate::inbound::http::conferences::register_for_conference,
        crate::inbound::http::conferences::unregister_from_conference,
        crate::inbound::http::conferences::get_conferences_to_attend,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::save_profile,
        crate::inbound::http::sessions::create_session,
        crate::inbound::http::sessions::get_conference_sessions,
        crate::inbound::http::sessions::get_sessions_by_type,
        crate::inbound::http::sessions::get_sessions_by_name,
        crate::inbound::http::sessions::get_sessions_by_date,
        crate::inbound::http::sessions::get_sessions_by_speaker,
        crate::inbound::http::wishlist::add_session_to_wishlist,
        crate::inbound::http::wishlist::get_sessions_in_wishlist,
        crate::inbound::http::wishlist::delete_session_in_wishlist,
        crate::inbound::http::announcements::get_announcement,
        crate::inbound::http::announcements::get_featured_speaker,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        ConferenceForm,
        ConferenceRequest,
        ConferenceList,
        ConferenceQueryForm,
        ConferenceQueryFilter,
        ProfileForm,
        ProfileMiniForm,
        SessionForm,
        SessionRequest,
        SessionList,
        WishlistRequest,
        BooleanMessage,
        StringMessage,
    )),
    tags(
        (name = "users", description = "Login and logout"),
        (name = "conferences", description = "Conference creation, lookup and search"),
        (name = "registrations", description = "Seat registration"),
        (name = "profiles", description = "Caller profile"),
        (name = "sessions", description = "Conference sessions"),
        (name = "wishlist", description = "Session wishlist"),
        (name = "announcements", description = "Cached banners"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;
