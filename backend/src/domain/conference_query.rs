//! Conference search query.
//!
//! A [`ConferenceSearch`] is a plain value describing predicates and sort
//! order. Building it reads nothing; repositories execute it on demand and
//! may execute the same value any number of times.

use std::cmp::Ordering;

use crate::domain::{
    Conference, FilterClause, FilterField, FilterValue, NormalizedFilters,
};

/// One component of the result ordering, always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Field(FilterField),
    Name,
}

/// Conjunctive conference query with a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceSearch {
    clauses: Vec<FilterClause>,
    sort: Vec<SortKey>,
}

impl Default for ConferenceSearch {
    fn default() -> Self {
        Self::all()
    }
}

impl ConferenceSearch {
    /// Every conference, ordered by name.
    pub fn all() -> Self {
        Self {
            clauses: Vec::new(),
            sort: vec![SortKey::Name],
        }
    }

    /// Query for a normalised filter set.
    ///
    /// The inequality field, when present, leads the sort order.
    ///
    /// # Examples
    /// ```
    /// use conference_backend::domain::{
    ///     normalize_filters, ConferenceSearch, FilterField, RawFilter, SortKey,
    /// };
    ///
    /// let filters = normalize_filters(&[RawFilter::new("MAX_ATTENDEES", "GT", "10")]).unwrap();
    /// let search = ConferenceSearch::from_filters(filters);
    /// assert_eq!(
    ///     search.sort_keys(),
    ///     [SortKey::Field(FilterField::MaxAttendees), SortKey::Name]
    /// );
    /// ```
    pub fn from_filters(filters: NormalizedFilters) -> Self {
        let mut sort = Vec::with_capacity(2);
        if let Some(field) = filters.inequality_field {
            sort.push(SortKey::Field(field));
        }
        sort.push(SortKey::Name);
        Self {
            clauses: filters.clauses,
            sort,
        }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    /// Whether `conference` satisfies every clause.
    pub fn matches(&self, conference: &Conference) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause_matches(clause, conference))
    }

    /// Order two conferences by the sort keys, breaking ties by key.
    pub fn compare(&self, a: &Conference, b: &Conference) -> Ordering {
        self.sort
            .iter()
            .fold(Ordering::Equal, |acc, sort_key| {
                acc.then_with(|| compare_by(*sort_key, a, b))
            })
            .then_with(|| a.key.cmp(&b.key))
    }

    /// Run the query over an in-memory collection.
    pub fn apply<'a, I>(&self, conferences: I) -> Vec<Conference>
    where
        I: IntoIterator<Item = &'a Conference>,
    {
        let mut matched: Vec<Conference> = conferences
            .into_iter()
            .filter(|conference| self.matches(conference))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }
}

fn clause_matches(clause: &FilterClause, conference: &Conference) -> bool {
    let op = clause.operator;
    match (clause.field, &clause.value) {
        (FilterField::City, FilterValue::Text(value)) => {
            op.accepts(conference.city.as_str().cmp(value.as_str()))
        }
        (FilterField::Topic, FilterValue::Text(value)) => conference
            .topics
            .iter()
            .any(|topic| op.accepts(topic.as_str().cmp(value.as_str()))),
        (FilterField::Month, FilterValue::Integer(value)) => {
            op.accepts(conference.month.cmp(value))
        }
        (FilterField::MaxAttendees, FilterValue::Integer(value)) => {
            op.accepts(conference.max_attendees.cmp(value))
        }
        _ => false,
    }
}

fn compare_by(sort_key: SortKey, a: &Conference, b: &Conference) -> Ordering {
    match sort_key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Field(FilterField::City) => a.city.cmp(&b.city),
        SortKey::Field(FilterField::Topic) => a.topics.iter().min().cmp(&b.topics.iter().min()),
        SortKey::Field(FilterField::Month) => a.month.cmp(&b.month),
        SortKey::Field(FilterField::MaxAttendees) => a.max_attendees.cmp(&b.max_attendees),
    }
}
