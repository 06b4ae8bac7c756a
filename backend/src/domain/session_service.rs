//! Session and wishlist domain service.
//!
//! Creating a session checks the conference exists and is owned by the
//! caller, then queues a featured-speaker refresh once the speaker has more
//! than one session anywhere.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    ConferenceRepository, ConferenceRepositoryError, JobQueue, ProfileRepository,
    SessionCommand, SessionQuery, SessionRepository, SessionRepositoryError, WishlistCommand,
    WishlistQuery,
};
use crate::domain::profile_service::map_profile_error;
use crate::domain::{
    BackgroundJob, ConferenceKey, Error, Identity, Profile, Session, SessionDraft,
    SessionFilter, SessionKey,
};

/// Session service implementing the session and wishlist ports.
#[derive(Clone)]
pub struct SessionService<S, C, P, J> {
    sessions: Arc<S>,
    conferences: Arc<C>,
    profiles: Arc<P>,
    jobs: Arc<J>,
}

impl<S, C, P, J> SessionService<S, C, P, J> {
    /// Create a new service with the given collaborators.
    pub fn new(sessions: Arc<S>, conferences: Arc<C>, profiles: Arc<P>, jobs: Arc<J>) -> Self {
        Self {
            sessions,
            conferences,
            profiles,
            jobs,
        }
    }
}

fn map_session_error(error: SessionRepositoryError) -> Error {
    error.into_domain_error()
}

fn map_conference_error(error: ConferenceRepositoryError) -> Error {
    error.into_domain_error()
}

fn conference_not_found(key: &ConferenceKey) -> Error {
    Error::not_found(format!(
        "A conference could not be found with the conference key: {key}"
    ))
}

impl<S, C, P, J> SessionService<S, C, P, J>
where
    S: SessionRepository,
    C: ConferenceRepository,
    P: ProfileRepository,
    J: JobQueue,
{
    async fn ensure_conference_exists(&self, key: &ConferenceKey) -> Result<(), Error> {
        self.conferences
            .find_by_key(key)
            .await
            .map_err(map_conference_error)?
            .map(|_| ())
            .ok_or_else(|| conference_not_found(key))
    }

    async fn feature_speaker_if_repeated(&self, speaker: &str) -> Result<(), Error> {
        let count = self
            .sessions
            .find_by_speaker(speaker)
            .await
            .map_err(map_session_error)?
            .len();
        if count > 1 {
            let job = BackgroundJob::SetFeaturedSpeaker {
                speaker: speaker.to_owned(),
            };
            if let Err(err) = self.jobs.submit(job).await {
                warn!(speaker, error = %err, "featured speaker job submission failed");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<S, C, P, J> SessionCommand for SessionService<S, C, P, J>
where
    S: SessionRepository,
    C: ConferenceRepository,
    P: ProfileRepository,
    J: JobQueue,
{
    async fn create(
        &self,
        identity: &Identity,
        conference_key: &ConferenceKey,
        draft: SessionDraft,
    ) -> Result<Session, Error> {
        draft.validate()?;
        let conference = self
            .conferences
            .find_by_key(conference_key)
            .await
            .map_err(map_conference_error)?
            .ok_or_else(|| conference_not_found(conference_key))?;
        if !conference.is_organised_by(identity.user_id()) {
            return Err(Error::forbidden(
                "The maker of the conference is the only one that can update it.",
            ));
        }

        let session = draft.into_session(SessionKey::generate(), conference.key);
        self.sessions
            .insert(&session)
            .await
            .map_err(map_session_error)?;
        self.feature_speaker_if_repeated(&session.speaker).await?;
        Ok(session)
    }
}

#[async_trait]
impl<S, C, P, J> SessionQuery for SessionService<S, C, P, J>
where
    S: SessionRepository,
    C: ConferenceRepository,
    P: ProfileRepository,
    J: JobQueue,
{
    async fn by_conference(
        &self,
        conference_key: &ConferenceKey,
        filter: SessionFilter,
    ) -> Result<Vec<Session>, Error> {
        self.ensure_conference_exists(conference_key).await?;
        self.sessions
            .find_by_conference(conference_key, &filter)
            .await
            .map_err(map_session_error)
    }

    async fn by_speaker(&self, speaker: &str) -> Result<Vec<Session>, Error> {
        self.sessions
            .find_by_speaker(speaker)
            .await
            .map_err(map_session_error)
    }
}

#[async_trait]
impl<S, C, P, J> WishlistCommand for SessionService<S, C, P, J>
where
    S: SessionRepository,
    C: ConferenceRepository,
    P: ProfileRepository,
    J: JobQueue,
{
    async fn add(&self, identity: &Identity, key: &SessionKey) -> Result<Profile, Error> {
        let exists = self
            .sessions
            .find_by_key(key)
            .await
            .map_err(map_session_error)?
            .is_some();
        if !exists {
            return Err(Error::not_found(format!(
                "No session found with key: {key}"
            )));
        }
        self.profiles
            .add_to_wishlist(&Profile::for_identity(identity), key)
            .await
            .map_err(map_profile_error)
    }

    async fn remove(&self, identity: &Identity, key: &SessionKey) -> Result<Profile, Error> {
        self.profiles
            .remove_from_wishlist(&Profile::for_identity(identity), key)
            .await
            .map_err(map_profile_error)
    }
}

#[async_trait]
impl<S, C, P, J> WishlistQuery for SessionService<S, C, P, J>
where
    S: SessionRepository,
    C: ConferenceRepository,
    P: ProfileRepository,
    J: JobQueue,
{
    async fn sessions(&self, identity: &Identity) -> Result<Vec<Session>, Error> {
        let profile = self
            .profiles
            .insert_if_absent(&Profile::for_identity(identity))
            .await
            .map_err(map_profile_error)?;
        self.sessions
            .find_by_keys(&profile.session_keys_in_wishlist)
            .await
            .map_err(map_session_error)
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
