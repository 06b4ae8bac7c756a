//! Request field parsing shared by the HTTP handlers.
//!
//! Every failure becomes an `invalid_argument` [`Error`] whose details name
//! the offending field and a machine-readable code.

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::domain::{ConferenceKey, Error, SessionKey, TeeShirtSize};

/// Codes carried in the `details.code` member of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidKey,
    InvalidDate,
    InvalidTime,
    InvalidEnum,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidKey => "invalid_key",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidTime => "invalid_time",
            ErrorCode::InvalidEnum => "invalid_enum",
        }
    }
}

/// Name of a request field as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), json!(value));
    }
    Error::invalid_argument(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
        None,
    )
}

pub(crate) fn parse_conference_key(value: &str, field: FieldName) -> Result<ConferenceKey, Error> {
    value.parse().map_err(|err| {
        field_error(field, ErrorCode::InvalidKey, format!("{err}"), Some(value))
    })
}

pub(crate) fn parse_session_key(value: &str, field: FieldName) -> Result<SessionKey, Error> {
    value.parse().map_err(|err| {
        field_error(field, ErrorCode::InvalidKey, format!("{err}"), Some(value))
    })
}

/// Parse a `YYYY-MM-DD` date from the first ten characters of `value`.
///
/// Anything after the date, such as a time component, is ignored.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    let name = field.as_str();
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            field_error(
                field,
                ErrorCode::InvalidDate,
                format!("{name} must start with a YYYY-MM-DD date"),
                Some(value),
            )
        })
}

/// Parse an `HH:MM` time from the first five characters of `value`.
pub(crate) fn parse_time(value: &str, field: FieldName) -> Result<NaiveTime, Error> {
    let name = field.as_str();
    value
        .get(..5)
        .and_then(|prefix| NaiveTime::parse_from_str(prefix, "%H:%M").ok())
        .ok_or_else(|| {
            field_error(
                field,
                ErrorCode::InvalidTime,
                format!("{name} must start with an HH:MM time"),
                Some(value),
            )
        })
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}

pub(crate) fn parse_optional_time(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveTime>, Error> {
    value.map(|raw| parse_time(raw, field)).transpose()
}

pub(crate) fn parse_tee_shirt_size(value: &str, field: FieldName) -> Result<TeeShirtSize, Error> {
    value.parse().map_err(|err| {
        field_error(field, ErrorCode::InvalidEnum, format!("{err}"), Some(value))
    })
}
