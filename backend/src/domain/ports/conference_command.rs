//! Driving port for conference mutations.

use async_trait::async_trait;

use crate::domain::{ConferenceDraft, ConferenceKey, ConferenceUpdate, Error, Identity};

use super::ConferenceView;

/// Domain use-case port for creating and editing conferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConferenceCommand: Send + Sync {
    /// Create a conference organised by `identity`.
    async fn create(
        &self,
        identity: &Identity,
        draft: ConferenceDraft,
    ) -> Result<ConferenceView, Error>;

    /// Update a conference organised by `identity`.
    async fn update(
        &self,
        identity: &Identity,
        key: &ConferenceKey,
        update: ConferenceUpdate,
    ) -> Result<ConferenceView, Error>;
}
