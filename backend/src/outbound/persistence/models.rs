//! Diesel row structs and their conversions to domain entities.
//!
//! Rows never leave the persistence module. Keys are stored as raw UUIDs and
//! re-wrapped into their typed form on the way out.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Conference, ConferenceKey, Profile, Session, SessionKey, TeeShirtSize, UserId};

use super::schema::{conferences, profiles, sessions};

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: String,
    pub conference_keys_to_attend: Vec<Uuid>,
    pub session_keys_in_wishlist: Vec<Uuid>,
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: *profile.user_id.as_uuid(),
            display_name: profile.display_name.clone(),
            main_email: profile.main_email.clone(),
            tee_shirt_size: profile.tee_shirt_size.as_str().to_owned(),
            conference_keys_to_attend: profile
                .conference_keys_to_attend
                .iter()
                .map(|key| *key.as_uuid())
                .collect(),
            session_keys_in_wishlist: profile
                .session_keys_in_wishlist
                .iter()
                .map(|key| *key.as_uuid())
                .collect(),
        }
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        let tee_shirt_size = row.tee_shirt_size.parse().unwrap_or_else(|_| {
            warn!(
                value = row.tee_shirt_size.as_str(),
                user_id = %row.user_id,
                "unrecognised tee_shirt_size, treating as NOT_SPECIFIED"
            );
            TeeShirtSize::NotSpecified
        });
        Self {
            user_id: UserId::from_uuid(row.user_id),
            display_name: row.display_name,
            main_email: row.main_email,
            tee_shirt_size,
            conference_keys_to_attend: row
                .conference_keys_to_attend
                .into_iter()
                .map(ConferenceKey::from_uuid)
                .collect(),
            session_keys_in_wishlist: row
                .session_keys_in_wishlist
                .into_iter()
                .map(SessionKey::from_uuid)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = conferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ConferenceRow {
    pub id: Uuid,
    pub organizer_user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub topics: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub month: i32,
    pub max_attendees: i32,
    pub seats_available: i32,
}

impl From<&Conference> for ConferenceRow {
    fn from(conference: &Conference) -> Self {
        Self {
            id: *conference.key.as_uuid(),
            organizer_user_id: *conference.organizer_user_id.as_uuid(),
            name: conference.name.clone(),
            description: conference.description.clone(),
            city: conference.city.clone(),
            topics: conference.topics.clone(),
            start_date: conference.start_date,
            end_date: conference.end_date,
            month: conference.month,
            max_attendees: conference.max_attendees,
            seats_available: conference.seats_available,
        }
    }
}

impl From<ConferenceRow> for Conference {
    fn from(row: ConferenceRow) -> Self {
        Self {
            key: ConferenceKey::from_uuid(row.id),
            organizer_user_id: UserId::from_uuid(row.organizer_user_id),
            name: row.name,
            description: row.description,
            city: row.city,
            topics: row.topics,
            start_date: row.start_date,
            end_date: row.end_date,
            month: row.month,
            max_attendees: row.max_attendees,
            seats_available: row.seats_available,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub id: Uuid,
    pub conference_id: Uuid,
    pub name: String,
    pub highlights: String,
    pub speaker: String,
    pub duration: i32,
    pub type_of_session: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
}

impl From<&Session> for SessionRow {
    fn from(session: &Session) -> Self {
        Self {
            id: *session.key.as_uuid(),
            conference_id: *session.conference_key.as_uuid(),
            name: session.name.clone(),
            highlights: session.highlights.clone(),
            speaker: session.speaker.clone(),
            duration: session.duration,
            type_of_session: session.type_of_session.clone(),
            date: session.date,
            start_time: session.start_time,
        }
    }
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            key: SessionKey::from_uuid(row.id),
            conference_key: ConferenceKey::from_uuid(row.conference_id),
            name: row.name,
            highlights: row.highlights,
            speaker: row.speaker,
            duration: row.duration,
            type_of_session: row.type_of_session,
            date: row.date,
            start_time: row.start_time,
        }
    }
}
