//! Port for session persistence.

use async_trait::async_trait;

use crate::domain::{ConferenceKey, Session, SessionFilter, SessionKey};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError for "session repository" {}
}

/// Sessions are returned in [`session_order`](crate::domain::session_order)
/// unless stated otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError>;

    /// Fetch a session by key.
    async fn find_by_key(&self, key: &SessionKey)
    -> Result<Option<Session>, SessionRepositoryError>;

    /// Batch fetch, preserving the order of `keys` and skipping missing ones.
    async fn find_by_keys(&self, keys: &[SessionKey])
    -> Result<Vec<Session>, SessionRepositoryError>;

    /// Sessions of one conference passing `filter`.
    async fn find_by_conference(
        &self,
        conference_key: &ConferenceKey,
        filter: &SessionFilter,
    ) -> Result<Vec<Session>, SessionRepositoryError>;

    /// Sessions given by `speaker` across every conference.
    async fn find_by_speaker(&self, speaker: &str) -> Result<Vec<Session>, SessionRepositoryError>;
}
