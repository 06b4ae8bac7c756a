//! Conference search filters.
//!
//! Clients send filters as loose `(field, operator, value)` string triples.
//! [`normalize_filters`] turns them into typed [`FilterClause`]s, rejecting
//! unknown tokens and enforcing that at most one field carries an
//! inequality comparison.

#![deny(missing_docs)]

use std::cmp::Ordering;
use std::fmt;

use crate::domain::Error;

/// Conference properties that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Host city, compared as text.
    City,
    /// Any one of the conference topics.
    Topic,
    /// Start month, 1 to 12, or 0 when undated.
    Month,
    /// Seat capacity.
    MaxAttendees,
}

impl FilterField {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "CITY" => Some(Self::City),
            "TOPIC" => Some(Self::Topic),
            "MONTH" => Some(Self::Month),
            "MAX_ATTENDEES" => Some(Self::MaxAttendees),
            _ => None,
        }
    }

    /// Name of the conference property the field addresses.
    pub fn property(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Topic => "topics",
            Self::Month => "month",
            Self::MaxAttendees => "maxAttendees",
        }
    }

    /// Whether values for this field are integers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Month | Self::MaxAttendees)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property())
    }
}

/// Comparison operators accepted in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// `EQ`, equal to.
    Eq,
    /// `GT`, greater than.
    Gt,
    /// `GTEQ`, greater than or equal to.
    GtEq,
    /// `LT`, less than.
    Lt,
    /// `LTEQ`, less than or equal to.
    LtEq,
    /// `NE`, not equal to.
    Ne,
}

impl FilterOperator {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "EQ" => Some(Self::Eq),
            "GT" => Some(Self::Gt),
            "GTEQ" => Some(Self::GtEq),
            "LT" => Some(Self::Lt),
            "LTEQ" => Some(Self::LtEq),
            "NE" => Some(Self::Ne),
            _ => None,
        }
    }

    /// Query-language symbol for the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Ne => "!=",
        }
    }

    /// Everything except equality is an inequality.
    pub fn is_inequality(self) -> bool {
        self != Self::Eq
    }

    /// Whether an `ordering` of `stored.cmp(&requested)` satisfies the operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Gt => ordering.is_gt(),
            Self::GtEq => ordering.is_ge(),
            Self::Lt => ordering.is_lt(),
            Self::LtEq => ordering.is_le(),
            Self::Ne => ordering.is_ne(),
        }
    }
}

/// Typed comparison value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Value for the text fields.
    Text(String),
    /// Value for the numeric fields.
    Integer(i32),
}

/// One normalised filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    /// Property under test.
    pub field: FilterField,
    /// Comparison applied as `stored <op> value`.
    pub operator: FilterOperator,
    /// Right-hand side, typed to match `field`.
    pub value: FilterValue,
}

/// Filter exactly as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilter {
    /// Field token such as `CITY`.
    pub field: String,
    /// Operator token such as `GTEQ`.
    pub operator: String,
    /// Unparsed comparison value.
    pub value: String,
}

impl RawFilter {
    /// Build a filter from its three tokens.
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Output of [`normalize_filters`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFilters {
    /// The single field compared with an inequality, if any.
    pub inequality_field: Option<FilterField>,
    /// Clauses in request order.
    pub clauses: Vec<FilterClause>,
}

/// Reasons a filter set is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A field or operator token is not recognised.
    #[error("Filter contains invalid field or operator.")]
    InvalidFieldOrOperator,
    /// Two distinct fields use inequality operators.
    #[error("Inequality filter is allowed on only one field.")]
    MultipleInequalityFields,
    /// A numeric field received a non-integer value.
    #[error("Filter value for {field} must be an integer, got '{value}'.")]
    InvalidInteger {
        /// The numeric field being filtered.
        field: FilterField,
        /// The rejected value token.
        value: String,
    },
}

impl From<FilterError> for Error {
    fn from(value: FilterError) -> Self {
        Error::invalid_argument(value.to_string())
    }
}

fn coerce(field: FilterField, raw: &str) -> Result<FilterValue, FilterError> {
    if !field.is_numeric() {
        return Ok(FilterValue::Text(raw.to_owned()));
    }
    raw.trim()
        .parse::<i32>()
        .map(FilterValue::Integer)
        .map_err(|_| FilterError::InvalidInteger {
            field,
            value: raw.to_owned(),
        })
}

/// Validate and type a client filter list.
///
/// # Examples
/// ```
/// use conference_backend::domain::{normalize_filters, FilterField, RawFilter};
///
/// let filters = normalize_filters(&[
///     RawFilter::new("CITY", "EQ", "London"),
///     RawFilter::new("MONTH", "GT", "6"),
/// ])
/// .unwrap();
/// assert_eq!(filters.inequality_field, Some(FilterField::Month));
/// assert_eq!(filters.clauses.len(), 2);
/// ```
pub fn normalize_filters(raw: &[RawFilter]) -> Result<NormalizedFilters, FilterError> {
    let mut normalized = NormalizedFilters::default();
    for filter in raw {
        let field =
            FilterField::from_token(&filter.field).ok_or(FilterError::InvalidFieldOrOperator)?;
        let operator = FilterOperator::from_token(&filter.operator)
            .ok_or(FilterError::InvalidFieldOrOperator)?;
        let value = coerce(field, &filter.value)?;

        if operator.is_inequality() {
            match normalized.inequality_field {
                Some(existing) if existing != field => {
                    return Err(FilterError::MultipleInequalityFields);
                }
                _ => normalized.inequality_field = Some(field),
            }
        }

        normalized.clauses.push(FilterClause {
            field,
            operator,
            value,
        });
    }
    Ok(normalized)
}
