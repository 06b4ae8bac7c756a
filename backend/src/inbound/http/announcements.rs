//! Cached announcement banners.
//!
//! ```text
//! GET /api/v1/conference/announcement/get
//! GET /api/v1/conference/featSpeaker/get
//! ```

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::StringMessage;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Nearly-sold-out notice; empty when no conference qualifies.
#[utoipa::path(
    get,
    path = "/api/v1/conference/announcement/get",
    responses(
        (status = 200, description = "Announcement text", body = StringMessage),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "getAnnouncement",
    security([])
)]
#[get("/conference/announcement/get")]
pub async fn get_announcement(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StringMessage>> {
    let data = state.announcements.announcement().await?;
    Ok(web::Json(StringMessage { data }))
}

#[utoipa::path(
    get,
    path = "/api/v1/conference/featSpeaker/get",
    responses(
        (status = 200, description = "Featured speaker banner", body = StringMessage),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "getFeaturedSpeaker",
    security([])
)]
#[get("/conference/featSpeaker/get")]
pub async fn get_featured_speaker(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StringMessage>> {
    let data = state.announcements.featured_speaker().await?;
    Ok(web::Json(StringMessage { data }))
}
