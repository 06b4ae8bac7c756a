//! Driving port for session creation.

use async_trait::async_trait;

use crate::domain::{ConferenceKey, Error, Identity, Session, SessionDraft};

/// Domain use-case port for adding sessions to a conference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionCommand: Send + Sync {
    /// Create a session under a conference organised by `identity`.
    async fn create(
        &self,
        identity: &Identity,
        conference_key: &ConferenceKey,
        draft: SessionDraft,
    ) -> Result<Session, Error>;
}
