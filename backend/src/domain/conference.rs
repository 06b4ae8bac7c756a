//! Conference aggregate and its creation/update rules.
//!
//! Creation goes through [`ConferenceDraft::into_conference`], which applies
//! the documented defaults and derives `month` and `seats_available`.
//! Updates go through [`ConferenceUpdate::apply_to`], which only touches the
//! supplied fields.

use chrono::{Datelike, NaiveDate};

use crate::domain::{ConferenceKey, Error, UserId};

/// City used when a conference is created without one.
pub const DEFAULT_CITY: &str = "Default City";
/// Topics used when a conference is created without any.
pub const DEFAULT_TOPICS: [&str; 2] = ["Default", "Topic"];

/// A conference owned by its organiser.
///
/// ## Invariants
/// - `month` is the month of `start_date`, or `0` when no start date is set.
/// - `seats_available` is intended to stay within `0..=max_attendees`;
///   updates to `max_attendees` do not re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub key: ConferenceKey,
    pub organizer_user_id: UserId,
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

impl Conference {
    /// Whether `user_id` owns this conference.
    pub fn is_organised_by(&self, user_id: &UserId) -> bool {
        &self.organizer_user_id == user_id
    }
}

/// Month number for an optional start date.
pub fn month_of(start_date: Option<NaiveDate>) -> i32 {
    start_date.map_or(0, |date| {
        // Months are 1..=12 so the cast is lossless.
        i32::try_from(date.month()).unwrap_or_default()
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Caller-supplied values for a new conference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceDraft {
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub topics: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_attendees: Option<i32>,
}

impl ConferenceDraft {
    /// Check required fields and numeric bounds.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_argument("Conference 'name' field required"));
        }
        if self.max_attendees.is_some_and(|max| max < 0) {
            return Err(Error::invalid_argument("maxAttendees must not be negative"));
        }
        Ok(())
    }

    /// Return a copy with every optional field populated from the defaults.
    ///
    /// # Examples
    /// ```
    /// use conference_backend::domain::{ConferenceDraft, DEFAULT_CITY};
    ///
    /// let draft = ConferenceDraft { name: "RustConf".into(), ..ConferenceDraft::default() };
    /// let filled = draft.with_defaults();
    /// assert_eq!(filled.city.as_deref(), Some(DEFAULT_CITY));
    /// assert_eq!(filled.max_attendees, Some(0));
    /// ```
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let city = non_empty(self.city.as_ref()).unwrap_or(DEFAULT_CITY);
        let topics = match &self.topics {
            Some(topics) if !topics.is_empty() => topics.clone(),
            _ => DEFAULT_TOPICS.iter().map(|t| (*t).to_owned()).collect(),
        };
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            city: Some(city.to_owned()),
            topics: Some(topics),
            start_date: self.start_date,
            end_date: self.end_date,
            max_attendees: Some(self.max_attendees.unwrap_or(0)),
        }
    }

    /// Build the stored conference, opening every seat.
    pub fn into_conference(self, key: ConferenceKey, organizer_user_id: UserId) -> Conference {
        let filled = self.with_defaults();
        let max_attendees = filled.max_attendees.unwrap_or(0);
        Conference {
            key,
            organizer_user_id,
            name: filled.name,
            description: filled.description,
            city: filled.city.unwrap_or_else(|| DEFAULT_CITY.to_owned()),
            topics: filled.topics.unwrap_or_default(),
            start_date: filled.start_date,
            end_date: filled.end_date,
            month: month_of(filled.start_date),
            max_attendees,
            seats_available: max_attendees,
        }
    }
}

/// Partial update applied by the organiser.
///
/// `None` and blank strings leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub topics: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_attendees: Option<i32>,
}

impl ConferenceUpdate {
    /// Check numeric bounds on supplied values.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_attendees.is_some_and(|max| max < 0) {
            return Err(Error::invalid_argument("maxAttendees must not be negative"));
        }
        Ok(())
    }

    /// Copy supplied fields onto `conference`.
    pub fn apply_to(&self, conference: &mut Conference) {
        if let Some(name) = non_empty(self.name.as_ref()) {
            conference.name = name.to_owned();
        }
        if let Some(description) = non_empty(self.description.as_ref()) {
            conference.description = Some(description.to_owned());
        }
        if let Some(city) = non_empty(self.city.as_ref()) {
            conference.city = city.to_owned();
        }
        if let Some(topics) = self.topics.as_ref().filter(|t| !t.is_empty()) {
            conference.topics = topics.clone();
        }
        if let Some(start_date) = self.start_date {
            conference.start_date = Some(start_date);
            conference.month = month_of(Some(start_date));
        }
        if let Some(end_date) = self.end_date {
            conference.end_date = Some(end_date);
        }
        if let Some(max_attendees) = self.max_attendees {
            conference.max_attendees = max_attendees;
        }
    }
}
