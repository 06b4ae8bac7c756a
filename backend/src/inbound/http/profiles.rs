//! Profile handlers.
//!
//! ```text
//! GET  /api/v1/profile
//! POST /api/v1/profile {"displayName":"Ada","teeShirtSize":"M_W"}
//! ```

use actix_web::{get, post, web};

use crate::domain::ProfileUpdate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{ProfileForm, ProfileMiniForm};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Fetch the caller's profile, creating it on first access.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Caller profile", body = ProfileForm),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileForm>> {
    let identity = session.require_identity()?;
    let profile = state.profiles.profile(&identity).await?;
    Ok(web::Json(profile.into()))
}

/// Update display name and tee-shirt size. Blank values are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    request_body = ProfileMiniForm,
    responses(
        (status = 200, description = "Updated profile", body = ProfileForm),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "saveProfile"
)]
#[post("/profile")]
pub async fn save_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileMiniForm>,
) -> ApiResult<web::Json<ProfileForm>> {
    let identity = session.require_identity()?;
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let profile = state.profile_updates.save(&identity, update).await?;
    Ok(web::Json(profile.into()))
}
