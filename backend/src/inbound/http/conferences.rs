//! Conference HTTP handlers.
//!
//! ```text
//! POST   /api/v1/conference
//! GET    /api/v1/conference/{websafeConferenceKey}
//! PUT    /api/v1/conference/{websafeConferenceKey}
//! POST   /api/v1/conference/{websafeConferenceKey}   (register)
//! DELETE /api/v1/conference/{websafeConferenceKey}   (unregister)
//! POST   /api/v1/getConferencesCreated
//! POST   /api/v1/queryConferences
//! GET    /api/v1/conferences/attending
//! ```

use actix_web::{delete, get, post, put, web};

use crate::domain::{ConferenceDraft, ConferenceKey, ConferenceUpdate, Error, RawFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{
    BooleanMessage, ConferenceForm, ConferenceList, ConferenceQueryForm, ConferenceRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_conference_key};

const CONFERENCE_KEY: FieldName = FieldName::new("websafeConferenceKey");

fn path_key(path: web::Path<String>) -> Result<ConferenceKey, Error> {
    parse_conference_key(&path.into_inner(), CONFERENCE_KEY)
}

/// Create a conference organised by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/conference",
    request_body = ConferenceRequest,
    responses(
        (status = 200, description = "Created conference", body = ConferenceForm),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["conferences"],
    operation_id = "createConference"
)]
#[post("/conference")]
pub async fn create_conference(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ConferenceRequest>,
) -> ApiResult<web::Json<ConferenceForm>> {
    let identity = session.require_identity()?;
    let draft = ConferenceDraft::try_from(payload.into_inner())?;
    let view = state.conference_updates.create(&identity, draft).await?;
    Ok(web::Json(view.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/conference/{websafeConferenceKey}",
    params(("websafeConferenceKey" = String, Path, description = "Websafe conference key")),
    responses(
        (status = 200, description = "Conference", body = ConferenceForm),
        (status = 400, description = "Malformed key", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["conferences"],
    operation_id = "getConference",
    security([])
)]
#[get("/conference/{websafeConferenceKey}")]
pub async fn get_conference(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ConferenceForm>> {
    let key = path_key(path)?;
    let view = state.conferences.get(&key).await?;
    Ok(web::Json(view.into()))
}

/// Apply the supplied fields to a conference the caller organises.
#[utoipa::path(
    put,
    path = "/api/v1/conference/{websafeConferenceKey}",
    params(("websafeConferenceKey" = String, Path, description = "Websafe conference key")),
    request_body = ConferenceRequest,
    responses(
        (status = 200, description = "Updated conference", body = ConferenceForm),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not the organiser", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["conferences"],
    operation_id = "updateConference"
)]
#[put("/conference/{websafeConferenceKey}")]
pub async fn update_conference(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ConferenceRequest>,
) -> ApiResult<web::Json<ConferenceForm>> {
    let identity = session.require_identity()?;
    let key = path_key(path)?;
    let update = ConferenceUpdate::try_from(payload.into_inner())?;
    let view = state
        .conference_updates
        .update(&identity, &key, update)
        .await?;
    Ok(web::Json(view.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/getConferencesCreated",
    responses(
        (status = 200, description = "Conferences organised by the caller", body = ConferenceList),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["conferences"],
    operation_id = "getConferencesCreated"
)]
#[post("/getConferencesCreated")]
pub async fn get_conferences_created(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ConferenceList>> {
    let identity = session.require_identity()?;
    let views = state.conferences.created_by(&identity).await?;
    Ok(web::Json(views.into_iter().collect()))
}

/// Search conferences with field/operator/value filters.
///
/// At most one field may use an inequality operator; results are sorted by
/// that field first, then by name.
#[utoipa::path(
    post,
    path = "/api/v1/queryConferences",
    request_body = ConferenceQueryForm,
    responses(
        (status = 200, description = "Matching conferences", body = ConferenceList),
        (status = 400, description = "Malformed filters", body = ErrorSchema)
    ),
    tags = ["conferences"],
    operation_id = "queryConferences",
    security([])
)]
#[post("/queryConferences")]
pub async fn query_conferences(
    state: web::Data<HttpState>,
    payload: web::Json<ConferenceQueryForm>,
) -> ApiResult<web::Json<ConferenceList>> {
    let filters: Vec<RawFilter> = payload
        .into_inner()
        .filters
        .into_iter()
        .map(RawFilter::from)
        .collect();
    let views = state.conferences.search(filters).await?;
    Ok(web::Json(views.into_iter().collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/conference/{websafeConferenceKey}",
    params(("websafeConferenceKey" = String, Path, description = "Websafe conference key")),
    responses(
        (status = 200, description = "Registered", body = BooleanMessage),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema),
        (status = 409, description = "Already registered or sold out", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "registerForConference"
)]
#[post("/conference/{websafeConferenceKey}")]
pub async fn register_for_conference(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BooleanMessage>> {
    let identity = session.require_identity()?;
    let key = path_key(path)?;
    let data = state.registrations.register(&identity, &key).await?;
    Ok(web::Json(BooleanMessage { data }))
}

/// Give back a seat. Answers `false` when the caller was not registered.
#[utoipa::path(
    delete,
    path = "/api/v1/conference/{websafeConferenceKey}",
    params(("websafeConferenceKey" = String, Path, description = "Websafe conference key")),
    responses(
        (status = 200, description = "Whether a registration was removed", body = BooleanMessage),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "unregisterFromConference"
)]
#[delete("/conference/{websafeConferenceKey}")]
pub async fn unregister_from_conference(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BooleanMessage>> {
    let identity = session.require_identity()?;
    let key = path_key(path)?;
    let data = state.registrations.unregister(&identity, &key).await?;
    Ok(web::Json(BooleanMessage { data }))
}

#[utoipa::path(
    get,
    path = "/api/v1/conferences/attending",
    responses(
        (status = 200, description = "Conferences the caller is registered for", body = ConferenceList),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "getConferencesToAttend"
)]
#[get("/conferences/attending")]
pub async fn get_conferences_to_attend(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ConferenceList>> {
    let identity = session.require_identity()?;
    let views = state.conferences.attending(&identity).await?;
    Ok(web::Json(views.into_iter().collect()))
}
