//! Driving port for session listings.

use async_trait::async_trait;

use crate::domain::{ConferenceKey, Error, Session, SessionFilter};

/// Domain use-case port for listing sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionQuery: Send + Sync {
    /// Sessions of an existing conference passing `filter`.
    async fn by_conference(
        &self,
        conference_key: &ConferenceKey,
        filter: SessionFilter,
    ) -> Result<Vec<Session>, Error>;

    /// Sessions given by `speaker` in any conference.
    async fn by_speaker(&self, speaker: &str) -> Result<Vec<Session>, Error>;
}
