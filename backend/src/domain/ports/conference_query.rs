//! Driving port for conference reads.

use async_trait::async_trait;

use crate::domain::{Conference, ConferenceKey, Error, Identity, RawFilter};

/// Conference paired with its organiser's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceView {
    pub conference: Conference,
    pub organizer_display_name: Option<String>,
}

/// Domain use-case port for reading conferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConferenceQuery: Send + Sync {
    /// Fetch one conference.
    async fn get(&self, key: &ConferenceKey) -> Result<ConferenceView, Error>;

    /// Conferences organised by the caller.
    async fn created_by(&self, identity: &Identity) -> Result<Vec<ConferenceView>, Error>;

    /// Search with client filters.
    async fn search(&self, filters: Vec<RawFilter>) -> Result<Vec<ConferenceView>, Error>;

    /// Conferences the caller is registered for, in registration order.
    async fn attending(&self, identity: &Identity) -> Result<Vec<ConferenceView>, Error>;
}
