//! Announcement domain service.
//!
//! Computes the cached banners and serves them back. Cache reads degrade to
//! an empty string when the backend is unavailable; cache writes propagate
//! their failure to the job that requested them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AnnouncementCache, AnnouncementCacheError, AnnouncementQuery, ConferenceRepository,
    ConferenceRepositoryError, SessionRepository, SessionRepositoryError,
};
use crate::domain::{
    Error, FEATURED_SPEAKER_KEY, NEARLY_SOLD_OUT_SEATS, RECENT_ANNOUNCEMENTS_KEY,
    announcement_text, featured_speaker_text,
};

/// Service computing and serving cached announcement text.
///
/// The cache may be a trait object so deployments can pick Redis or the
/// in-process map at start-up.
pub struct AnnouncementService<C, S, K: ?Sized> {
    conferences: Arc<C>,
    sessions: Arc<S>,
    cache: Arc<K>,
}

impl<C, S, K: ?Sized> Clone for AnnouncementService<C, S, K> {
    fn clone(&self) -> Self {
        Self {
            conferences: Arc::clone(&self.conferences),
            sessions: Arc::clone(&self.sessions),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<C, S, K: ?Sized> AnnouncementService<C, S, K> {
    /// Create a new service with the given collaborators.
    pub fn new(conferences: Arc<C>, sessions: Arc<S>, cache: Arc<K>) -> Self {
        Self {
            conferences,
            sessions,
            cache,
        }
    }
}

fn map_cache_error(error: AnnouncementCacheError) -> Error {
    match error {
        AnnouncementCacheError::Backend { message } => {
            Error::service_unavailable(format!("announcement cache unavailable: {message}"))
        }
    }
}

fn map_conference_error(error: ConferenceRepositoryError) -> Error {
    error.into_domain_error()
}

fn map_session_error(error: SessionRepositoryError) -> Error {
    error.into_domain_error()
}

impl<C, S, K: ?Sized> AnnouncementService<C, S, K>
where
    C: ConferenceRepository,
    S: SessionRepository,
    K: AnnouncementCache,
{
    /// Recompute the nearly-sold-out notice.
    ///
    /// Returns the cached text, or an empty string when the key was cleared.
    pub async fn refresh_announcement(&self) -> Result<String, Error> {
        let conferences = self
            .conferences
            .find_nearly_sold_out(NEARLY_SOLD_OUT_SEATS)
            .await
            .map_err(map_conference_error)?;
        match announcement_text(conferences.iter().map(|c| c.name.as_str())) {
            Some(text) => {
                self.cache
                    .set(RECENT_ANNOUNCEMENTS_KEY, &text)
                    .await
                    .map_err(map_cache_error)?;
                Ok(text)
            }
            None => {
                self.cache
                    .delete(RECENT_ANNOUNCEMENTS_KEY)
                    .await
                    .map_err(map_cache_error)?;
                Ok(String::new())
            }
        }
    }

    /// Recompute the featured speaker banner for `speaker`.
    ///
    /// Speakers with a single session leave the current banner in place;
    /// the banner in effect afterwards is returned.
    pub async fn set_featured_speaker(&self, speaker: &str) -> Result<String, Error> {
        let sessions = self
            .sessions
            .find_by_speaker(speaker)
            .await
            .map_err(map_session_error)?;
        if let Some(text) = featured_speaker_text(speaker, &sessions) {
            self.cache
                .set(FEATURED_SPEAKER_KEY, &text)
                .await
                .map_err(map_cache_error)?;
            return Ok(text);
        }
        debug!(speaker, "speaker has a single session; banner unchanged");
        self.read_or_empty(FEATURED_SPEAKER_KEY).await
    }

    async fn read_or_empty(&self, key: &str) -> Result<String, Error> {
        match self.cache.get(key).await {
            Ok(value) => Ok(value.unwrap_or_default()),
            Err(err) => {
                warn!(key, error = %err, "announcement cache read failed; serving empty text");
                Ok(String::new())
            }
        }
    }
}

#[async_trait]
impl<C, S, K: ?Sized> AnnouncementQuery for AnnouncementService<C, S, K>
where
    C: ConferenceRepository,
    S: SessionRepository,
    K: AnnouncementCache,
{
    async fn announcement(&self) -> Result<String, Error> {
        self.read_or_empty(RECENT_ANNOUNCEMENTS_KEY).await
    }

    async fn featured_speaker(&self) -> Result<String, Error> {
        self.read_or_empty(FEATURED_SPEAKER_KEY).await
    }
}
