//! Conference sessions.
//!
//! A session always belongs to exactly one conference through
//! `conference_key`. Queries are expressed with [`SessionFilter`] so storage
//! adapters share a single matching and ordering rule.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{ConferenceKey, Error, SessionKey};

/// Placeholder for descriptive session fields left blank by the organiser.
pub const TO_BE_ANNOUNCED: &str = "To Be Announced";
/// Session length used when none is supplied.
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

/// A talk, workshop or keynote scheduled within a conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub key: SessionKey,
    pub conference_key: ConferenceKey,
    pub name: String,
    pub highlights: String,
    pub speaker: String,
    pub duration: i32,
    pub type_of_session: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
}

/// Caller-supplied values for a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDraft {
    pub name: String,
    pub highlights: Option<String>,
    pub speaker: Option<String>,
    pub duration: Option<i32>,
    pub type_of_session: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
}

fn or_announced(value: Option<&String>) -> String {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(TO_BE_ANNOUNCED)
        .to_owned()
}

impl SessionDraft {
    /// Check required fields and numeric bounds.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_argument(
                "The session field 'name' is required",
            ));
        }
        if self.duration.is_some_and(|minutes| minutes < 0) {
            return Err(Error::invalid_argument("duration must not be negative"));
        }
        Ok(())
    }

    /// Build the stored session under `conference_key`, filling defaults.
    pub fn into_session(self, key: SessionKey, conference_key: ConferenceKey) -> Session {
        Session {
            key,
            conference_key,
            highlights: or_announced(self.highlights.as_ref()),
            speaker: or_announced(self.speaker.as_ref()),
            type_of_session: or_announced(self.type_of_session.as_ref()),
            duration: self.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
            name: self.name,
            date: self.date,
            start_time: self.start_time,
        }
    }
}

/// Narrowing applied to the sessions of one conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFilter {
    All,
    ByType(String),
    ByName(String),
    ByDate(NaiveDate),
}

impl SessionFilter {
    /// Whether `session` passes the filter. Conference scoping is the
    /// caller's concern.
    pub fn matches(&self, session: &Session) -> bool {
        match self {
            Self::All => true,
            Self::ByType(kind) => &session.type_of_session == kind,
            Self::ByName(name) => &session.name == name,
            Self::ByDate(date) => session.date.as_ref() == Some(date),
        }
    }
}

/// Listing order for sessions: date, then start time, then name.
///
/// Unscheduled sessions sort before scheduled ones.
pub fn session_order(a: &Session, b: &Session) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.start_time.cmp(&b.start_time))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.key.cmp(&b.key))
}
