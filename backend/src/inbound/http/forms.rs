//! Wire forms exchanged with API clients.
//!
//! Every form is camelCase JSON. Keys travel in their websafe string form,
//! dates as `YYYY-MM-DD` and start times as `HH:MM`. Request forms convert
//! into domain drafts with `TryFrom` so malformed fields surface as
//! `invalid_argument` errors naming the field.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ConferenceView;
use crate::domain::{
    ConferenceDraft, ConferenceUpdate, Error, Profile, ProfileUpdate, RawFilter, Session,
    SessionDraft,
};
use crate::inbound::http::validation::{
    FieldName, parse_optional_date, parse_optional_time, parse_tee_shirt_size,
};

const START_DATE: FieldName = FieldName::new("startDate");
const END_DATE: FieldName = FieldName::new("endDate");
const SESSION_DATE: FieldName = FieldName::new("date");
const START_TIME: FieldName = FieldName::new("startTime");
const TEE_SHIRT_SIZE: FieldName = FieldName::new("teeShirtSize");

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M").to_string())
}

/// Conference as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceForm {
    pub name: String,
    pub description: Option<String>,
    pub organizer_user_id: String,
    pub topics: Vec<String>,
    pub city: String,
    #[schema(example = "2026-05-01")]
    pub start_date: Option<String>,
    #[schema(example = "2026-05-03")]
    pub end_date: Option<String>,
    pub month: i32,
    pub max_attendees: i32,
    pub seats_available: i32,
    pub websafe_key: String,
    pub organizer_display_name: Option<String>,
}

impl From<ConferenceView> for ConferenceForm {
    fn from(view: ConferenceView) -> Self {
        let ConferenceView {
            conference,
            organizer_display_name,
        } = view;
        Self {
            websafe_key: conference.key.to_websafe(),
            organizer_user_id: conference.organizer_user_id.to_string(),
            name: conference.name,
            description: conference.description,
            topics: conference.topics,
            city: conference.city,
            start_date: format_date(conference.start_date),
            end_date: format_date(conference.end_date),
            month: conference.month,
            max_attendees: conference.max_attendees,
            seats_available: conference.seats_available,
            organizer_display_name,
        }
    }
}

/// Body of conference create and update requests.
///
/// Example JSON:
/// `{"name":"RustConf","city":"London","topics":["Rust"],"startDate":"2026-05-01","maxAttendees":100}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub topics: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_attendees: Option<i32>,
}

impl TryFrom<ConferenceRequest> for ConferenceDraft {
    type Error = Error;

    fn try_from(value: ConferenceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_optional_date(value.start_date.as_deref(), START_DATE)?,
            end_date: parse_optional_date(value.end_date.as_deref(), END_DATE)?,
            name: value.name.unwrap_or_default(),
            description: value.description,
            city: value.city,
            topics: value.topics,
            max_attendees: value.max_attendees,
        })
    }
}

impl TryFrom<ConferenceRequest> for ConferenceUpdate {
    type Error = Error;

    fn try_from(value: ConferenceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_optional_date(non_blank(value.start_date.as_deref()), START_DATE)?,
            end_date: parse_optional_date(non_blank(value.end_date.as_deref()), END_DATE)?,
            name: value.name,
            description: value.description,
            city: value.city,
            topics: value.topics,
            max_attendees: value.max_attendees,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Full profile of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub display_name: String,
    pub main_email: String,
    #[schema(example = "NOT_SPECIFIED")]
    pub tee_shirt_size: String,
    pub conference_keys_to_attend: Vec<String>,
    pub session_keys_in_wishlist: Vec<String>,
}

impl From<Profile> for ProfileForm {
    fn from(profile: Profile) -> Self {
        Self {
            tee_shirt_size: profile.tee_shirt_size.as_str().to_owned(),
            conference_keys_to_attend: profile
                .conference_keys_to_attend
                .iter()
                .map(|key| key.to_websafe())
                .collect(),
            session_keys_in_wishlist: profile
                .session_keys_in_wishlist
                .iter()
                .map(|key| key.to_websafe())
                .collect(),
            display_name: profile.display_name,
            main_email: profile.main_email,
        }
    }
}

/// Editable subset of a profile.
///
/// Example JSON: `{"displayName":"Ada","teeShirtSize":"M_W"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMiniForm {
    pub display_name: Option<String>,
    pub tee_shirt_size: Option<String>,
}

impl TryFrom<ProfileMiniForm> for ProfileUpdate {
    type Error = Error;

    fn try_from(value: ProfileMiniForm) -> Result<Self, Self::Error> {
        let tee_shirt_size = non_blank(value.tee_shirt_size.as_deref())
            .map(|raw| parse_tee_shirt_size(raw, TEE_SHIRT_SIZE))
            .transpose()?;
        Ok(Self {
            display_name: value.display_name,
            tee_shirt_size,
        })
    }
}

/// Session as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub websafe_key: String,
    pub websafe_conference_key: String,
    pub name: String,
    pub highlights: String,
    pub speaker: String,
    pub duration: i32,
    pub type_of_session: String,
    #[schema(example = "2026-05-01")]
    pub date: Option<String>,
    #[schema(example = "09:30")]
    pub start_time: Option<String>,
}

impl From<Session> for SessionForm {
    fn from(session: Session) -> Self {
        Self {
            websafe_key: session.key.to_websafe(),
            websafe_conference_key: session.conference_key.to_websafe(),
            name: session.name,
            highlights: session.highlights,
            speaker: session.speaker,
            duration: session.duration,
            type_of_session: session.type_of_session,
            date: format_date(session.date),
            start_time: format_time(session.start_time),
        }
    }
}

/// Body of `POST /api/v1/session`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub websafe_conference_key: Option<String>,
    pub name: Option<String>,
    pub highlights: Option<String>,
    pub speaker: Option<String>,
    pub duration: Option<i32>,
    pub type_of_session: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
}

impl SessionRequest {
    /// Split into the target conference key and the session draft.
    pub fn into_parts(self) -> Result<(Option<String>, SessionDraft), Error> {
        let draft = SessionDraft {
            date: parse_optional_date(non_blank(self.date.as_deref()), SESSION_DATE)?,
            start_time: parse_optional_time(non_blank(self.start_time.as_deref()), START_TIME)?,
            name: self.name.unwrap_or_default(),
            highlights: self.highlights,
            speaker: self.speaker,
            duration: self.duration,
            type_of_session: self.type_of_session,
        };
        Ok((self.websafe_conference_key, draft))
    }
}

/// One client filter clause, validated later by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceQueryFilter {
    #[schema(example = "CITY")]
    pub field: String,
    #[schema(example = "EQ")]
    pub operator: String,
    #[schema(example = "London")]
    pub value: String,
}

impl From<ConferenceQueryFilter> for RawFilter {
    fn from(value: ConferenceQueryFilter) -> Self {
        RawFilter::new(value.field, value.operator, value.value)
    }
}

/// Body of `POST /api/v1/queryConferences`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceQueryForm {
    #[serde(default)]
    pub filters: Vec<ConferenceQueryFilter>,
}

/// Body of the wishlist add and delete requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
    pub websafe_session_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BooleanMessage {
    pub data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StringMessage {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConferenceList {
    pub items: Vec<ConferenceForm>,
}

impl FromIterator<ConferenceView> for ConferenceList {
    fn from_iter<I: IntoIterator<Item = ConferenceView>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(ConferenceForm::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionList {
    pub items: Vec<SessionForm>,
}

impl FromIterator<Session> for SessionList {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(SessionForm::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConferenceKey, ErrorCode, Identity, SessionKey, TeeShirtSize};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn organiser() -> Identity {
        Identity::from_email("ada@example.com").expect("identity")
    }

    #[rstest]
    fn conference_forms_render_websafe_keys_and_dates(organiser: Identity) {
        let key = ConferenceKey::generate();
        let draft = ConferenceDraft {
            name: "RustConf".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            max_attendees: Some(40),
            ..ConferenceDraft::default()
        };
        let view = ConferenceView {
            conference: draft.into_conference(key, organiser.user_id().clone()),
            organizer_display_name: Some("ada".into()),
        };

        let value = serde_json::to_value(ConferenceForm::from(view)).expect("serialise");
        assert_eq!(value["websafeKey"], key.to_websafe());
        assert_eq!(value["organizerUserId"], organiser.user_id().to_string());
        assert_eq!(value["startDate"], "2026-05-01");
        assert_eq!(value["endDate"], Value::Null);
        assert_eq!(value["month"], 5);
        assert_eq!(value["seatsAvailable"], 40);
        assert_eq!(value["organizerDisplayName"], "ada");
    }

    #[rstest]
    fn conference_requests_parse_leading_dates() {
        let request: ConferenceRequest = serde_json::from_value(json!({
            "name": "RustConf",
            "startDate": "2026-05-01T00:00:00.000Z",
        }))
        .expect("request");
        let draft = ConferenceDraft::try_from(request).expect("draft");
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2026, 5, 1));
    }

    #[rstest]
    fn bad_conference_dates_name_the_field() {
        let request = ConferenceRequest {
            end_date: Some("next tuesday".into()),
            ..ConferenceRequest::default()
        };
        let err = ConferenceUpdate::try_from(request).expect_err("bad date");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(err.details().expect("details")["field"], "endDate");
    }

    #[rstest]
    fn blank_update_dates_leave_stored_values() {
        let request = ConferenceRequest {
            start_date: Some(String::new()),
            ..ConferenceRequest::default()
        };
        let update = ConferenceUpdate::try_from(request).expect("update");
        assert_eq!(update.start_date, None);
    }

    #[rstest]
    fn profile_forms_list_websafe_keys(organiser: Identity) {
        let mut profile = Profile::for_identity(&organiser);
        let conference = ConferenceKey::generate();
        let session = SessionKey::generate();
        profile.conference_keys_to_attend.push(conference);
        profile.session_keys_in_wishlist.push(session);

        let form = ProfileForm::from(profile);
        assert_eq!(form.display_name, "ada");
        assert_eq!(form.tee_shirt_size, "NOT_SPECIFIED");
        assert_eq!(form.conference_keys_to_attend, vec![conference.to_websafe()]);
        assert_eq!(form.session_keys_in_wishlist, vec![session.to_websafe()]);
    }

    #[rstest]
    #[case(Some("M_W"), Some(TeeShirtSize::MW))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn profile_mini_forms_parse_sizes(
        #[case] raw: Option<&str>,
        #[case] expected: Option<TeeShirtSize>,
    ) {
        let form = ProfileMiniForm {
            display_name: None,
            tee_shirt_size: raw.map(str::to_owned),
        };
        let update = ProfileUpdate::try_from(form).expect("update");
        assert_eq!(update.tee_shirt_size, expected);
    }

    #[rstest]
    fn unknown_sizes_are_invalid() {
        let form = ProfileMiniForm {
            display_name: None,
            tee_shirt_size: Some("HUGE".into()),
        };
        let err = ProfileUpdate::try_from(form).expect_err("bad size");
        assert_eq!(err.details().expect("details")["code"], "invalid_enum");
    }

    #[rstest]
    fn session_requests_split_key_and_draft() {
        let request: SessionRequest = serde_json::from_value(json!({
            "websafeConferenceKey": "abc",
            "name": "Keynote",
            "date": "2026-05-01",
            "startTime": "09:30:00",
        }))
        .expect("request");
        let (key, draft) = request.into_parts().expect("parts");
        assert_eq!(key.as_deref(), Some("abc"));
        assert_eq!(draft.name, "Keynote");
        assert_eq!(draft.start_time, NaiveTime::from_hms_opt(9, 30, 0));
    }

    #[rstest]
    fn session_forms_render_times_as_hours_and_minutes() {
        let conference = ConferenceKey::generate();
        let session = SessionDraft {
            name: "Keynote".into(),
            start_time: NaiveTime::from_hms_opt(14, 5, 0),
            ..SessionDraft::default()
        }
        .into_session(SessionKey::generate(), conference);

        let value = serde_json::to_value(SessionForm::from(session)).expect("serialise");
        assert_eq!(value["startTime"], "14:05");
        assert_eq!(value["websafeConferenceKey"], conference.to_websafe());
        assert_eq!(value["typeOfSession"], "To Be Announced");
        assert_eq!(value["duration"], 60);
    }

    #[rstest]
    fn query_forms_default_to_no_filters() {
        let form: ConferenceQueryForm = serde_json::from_value(json!({})).expect("form");
        assert!(form.filters.is_empty());
    }
}
