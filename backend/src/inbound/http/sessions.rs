//! Conference session handlers.
//!
//! ```text
//! POST /api/v1/session
//! GET  /api/v1/sessions/get/{websafeConferenceKey}
//! GET  /api/v1/session/type/{websafeConferenceKey}?typeOfSession=
//! GET  /api/v1/session/name/{websafeConferenceKey}?name=
//! GET  /api/v1/session/date/{websafeConferenceKey}?date=
//! GET  /api/v1/speaker?speaker=
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{ConferenceKey, Error, SessionFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{SessionForm, SessionList, SessionRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_conference_key, parse_date,
};

const CONFERENCE_KEY: FieldName = FieldName::new("websafeConferenceKey");

fn path_key(path: web::Path<String>) -> Result<ConferenceKey, Error> {
    parse_conference_key(&path.into_inner(), CONFERENCE_KEY)
}

fn required(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct TypeQuery {
    pub type_of_session: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpeakerQuery {
    pub speaker: Option<String>,
}

/// Create a session under a conference the caller organises.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Created session", body = SessionForm),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not the organiser", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "createSession"
)]
#[post("/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SessionRequest>,
) -> ApiResult<web::Json<SessionForm>> {
    let identity = session.require_identity()?;
    let (raw_key, draft) = payload.into_inner().into_parts()?;
    let raw_key = required(raw_key, CONFERENCE_KEY)?;
    let key = parse_conference_key(&raw_key, CONFERENCE_KEY)?;
    let created = state
        .session_updates
        .create(&identity, &key, draft)
        .await?;
    Ok(web::Json(created.into()))
}

async fn list(
    state: &HttpState,
    key: &ConferenceKey,
    filter: SessionFilter,
) -> ApiResult<web::Json<SessionList>> {
    let sessions = state.sessions.by_conference(key, filter).await?;
    Ok(web::Json(sessions.into_iter().collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/get/{websafeConferenceKey}",
    params(("websafeConferenceKey" = String, Path, description = "Websafe conference key")),
    responses(
        (status = 200, description = "Sessions of the conference", body = SessionList),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getConferenceSessions",
    security([])
)]
#[get("/sessions/get/{websafeConferenceKey}")]
pub async fn get_conference_sessions(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SessionList>> {
    let key = path_key(path)?;
    list(&state, &key, SessionFilter::All).await
}

#[utoipa::path(
    get,
    path = "/api/v1/session/type/{websafeConferenceKey}",
    params(
        ("websafeConferenceKey" = String, Path, description = "Websafe conference key"),
        TypeQuery
    ),
    responses(
        (status = 200, description = "Sessions of the given type", body = SessionList),
        (status = 400, description = "Missing type", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getConferenceSessionsByType",
    security([])
)]
#[get("/session/type/{websafeConferenceKey}")]
pub async fn get_sessions_by_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<TypeQuery>,
) -> ApiResult<web::Json<SessionList>> {
    let key = path_key(path)?;
    let kind = required(
        query.into_inner().type_of_session,
        FieldName::new("typeOfSession"),
    )?;
    list(&state, &key, SessionFilter::ByType(kind)).await
}

#[utoipa::path(
    get,
    path = "/api/v1/session/name/{websafeConferenceKey}",
    params(
        ("websafeConferenceKey" = String, Path, description = "Websafe conference key"),
        NameQuery
    ),
    responses(
        (status = 200, description = "Sessions with the given name", body = SessionList),
        (status = 400, description = "Missing name", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getConferenceSessionsByName",
    security([])
)]
#[get("/session/name/{websafeConferenceKey}")]
pub async fn get_sessions_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<NameQuery>,
) -> ApiResult<web::Json<SessionList>> {
    let key = path_key(path)?;
    let name = required(query.into_inner().name, FieldName::new("name"))?;
    list(&state, &key, SessionFilter::ByName(name)).await
}

#[utoipa::path(
    get,
    path = "/api/v1/session/date/{websafeConferenceKey}",
    params(
        ("websafeConferenceKey" = String, Path, description = "Websafe conference key"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Sessions on the given date", body = SessionList),
        (status = 400, description = "Missing or malformed date", body = ErrorSchema),
        (status = 404, description = "No such conference", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getConferenceSessionsByDate",
    security([])
)]
#[get("/session/date/{websafeConferenceKey}")]
pub async fn get_sessions_by_date(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<DateQuery>,
) -> ApiResult<web::Json<SessionList>> {
    let key = path_key(path)?;
    let field = FieldName::new("date");
    let raw = required(query.into_inner().date, field)?;
    let date = parse_date(&raw, field)?;
    list(&state, &key, SessionFilter::ByDate(date)).await
}

/// Sessions given by a speaker across every conference.
#[utoipa::path(
    get,
    path = "/api/v1/speaker",
    params(SpeakerQuery),
    responses(
        (status = 200, description = "Sessions by the speaker", body = SessionList),
        (status = 400, description = "Missing speaker", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getConferenceSessionsBySpeaker",
    security([])
)]
#[get("/speaker")]
pub async fn get_sessions_by_speaker(
    state: web::Data<HttpState>,
    query: web::Query<SpeakerQuery>,
) -> ApiResult<web::Json<SessionList>> {
    let speaker = required(query.into_inner().speaker, FieldName::new("speaker"))?;
    let sessions = state.sessions.by_speaker(&speaker).await?;
    Ok(web::Json(sessions.into_iter().collect()))
}
