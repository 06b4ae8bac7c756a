//! Session wishlist handlers.
//!
//! ```text
//! POST   /api/v1/profile/addSessionToWishlist {"websafeSessionKey":"..."}
//! GET    /api/v1/profile/wishlist
//! DELETE /api/v1/profile/deleteSessionInWishlist?websafeSessionKey=...
//! ```

use actix_web::{delete, get, post, web};

use crate::domain::{Error, SessionKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{ProfileForm, SessionList, WishlistRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_session_key};

const SESSION_KEY: FieldName = FieldName::new("websafeSessionKey");

fn session_key(request: WishlistRequest) -> Result<SessionKey, Error> {
    let raw = request
        .websafe_session_key
        .ok_or_else(|| missing_field_error(SESSION_KEY))?;
    parse_session_key(&raw, SESSION_KEY)
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/addSessionToWishlist",
    request_body = WishlistRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileForm),
        (status = 400, description = "Missing or malformed key", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such session", body = ErrorSchema),
        (status = 409, description = "Already in the wishlist", body = ErrorSchema)
    ),
    tags = ["wishlist"],
    operation_id = "addSessionToWishlist"
)]
#[post("/profile/addSessionToWishlist")]
pub async fn add_session_to_wishlist(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<WishlistRequest>,
) -> ApiResult<web::Json<ProfileForm>> {
    let identity = session.require_identity()?;
    let key = session_key(payload.into_inner())?;
    let profile = state.wishlist_updates.add(&identity, &key).await?;
    Ok(web::Json(profile.into()))
}

/// Sessions in the caller's wishlist. Deleted sessions are skipped.
#[utoipa::path(
    get,
    path = "/api/v1/profile/wishlist",
    responses(
        (status = 200, description = "Wishlisted sessions", body = SessionList),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["wishlist"],
    operation_id = "getSessionsInWishlist"
)]
#[get("/profile/wishlist")]
pub async fn get_sessions_in_wishlist(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionList>> {
    let identity = session.require_identity()?;
    let sessions = state.wishlist.sessions(&identity).await?;
    Ok(web::Json(sessions.into_iter().collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/profile/deleteSessionInWishlist",
    params(("websafeSessionKey" = String, Query, description = "Websafe session key")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileForm),
        (status = 400, description = "Missing or malformed key", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Session not in the wishlist", body = ErrorSchema)
    ),
    tags = ["wishlist"],
    operation_id = "deleteSessionInWishlist"
)]
#[delete("/profile/deleteSessionInWishlist")]
pub async fn delete_session_in_wishlist(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<WishlistRequest>,
) -> ApiResult<web::Json<ProfileForm>> {
    let identity = session.require_identity()?;
    let key = session_key(query.into_inner())?;
    let profile = state.wishlist_updates.remove(&identity, &key).await?;
    Ok(web::Json(profile.into()))
}
