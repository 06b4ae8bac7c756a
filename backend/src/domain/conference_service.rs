//! Conference domain service.
//!
//! Implements the conference and registration driving ports on top of the
//! conference, profile and registration repositories. Organiser display
//! names are resolved with one batch profile read per listing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    ConferenceCommand, ConferenceQuery, ConferenceRepository, ConferenceRepositoryError,
    ConferenceView, JobQueue, ProfileRepository, RegistrationCommand, RegistrationRepository,
    RegistrationRepositoryError,
};
use crate::domain::profile_service::map_profile_error;
use crate::domain::{
    BackgroundJob, Conference, ConferenceDraft, ConferenceKey, ConferenceSearch,
    ConferenceUpdate, Error, Identity, Profile, RawFilter, RegistrationChange, UserId,
    normalize_filters,
};

/// Conference service implementing the conference and registration ports.
#[derive(Clone)]
pub struct ConferenceService<C, P, R, J> {
    conferences: Arc<C>,
    profiles: Arc<P>,
    registrations: Arc<R>,
    jobs: Arc<J>,
}

impl<C, P, R, J> ConferenceService<C, P, R, J> {
    /// Create a new service with the given collaborators.
    pub fn new(conferences: Arc<C>, profiles: Arc<P>, registrations: Arc<R>, jobs: Arc<J>) -> Self {
        Self {
            conferences,
            profiles,
            registrations,
            jobs,
        }
    }
}

fn conference_summary(conference: &Conference) -> String {
    let start = conference
        .start_date
        .map_or_else(|| "TBA".to_owned(), |date| date.to_string());
    format!(
        "name: {}\ncity: {}\ntopics: {}\nstart date: {}\nmax attendees: {}\n",
        conference.name,
        conference.city,
        conference.topics.join(", "),
        start,
        conference.max_attendees,
    )
}

fn map_conference_error(error: ConferenceRepositoryError) -> Error {
    match error {
        err @ ConferenceRepositoryError::NotFound { .. } => Error::not_found(err.to_string()),
        err @ ConferenceRepositoryError::NotOwner => Error::forbidden(err.to_string()),
        other => other.into_domain_error(),
    }
}

fn map_registration_error(error: RegistrationRepositoryError) -> Error {
    match error {
        err @ RegistrationRepositoryError::ConferenceNotFound { .. } => {
            Error::not_found(err.to_string())
        }
        RegistrationRepositoryError::Rejected { rejection } => Error::from(rejection),
        other => other.into_domain_error(),
    }
}

fn not_found(key: &ConferenceKey) -> Error {
    map_conference_error(ConferenceRepositoryError::not_found(*key))
}

impl<C, P, R, J> ConferenceService<C, P, R, J>
where
    C: ConferenceRepository,
    P: ProfileRepository,
    R: RegistrationRepository,
    J: JobQueue,
{
    async fn with_organizers(
        &self,
        conferences: Vec<Conference>,
    ) -> Result<Vec<ConferenceView>, Error> {
        let mut organizers: Vec<UserId> = Vec::new();
        for conference in &conferences {
            if !organizers.contains(&conference.organizer_user_id) {
                organizers.push(conference.organizer_user_id.clone());
            }
        }
        let names: HashMap<UserId, String> = self
            .profiles
            .find_by_user_ids(&organizers)
            .await
            .map_err(map_profile_error)?
            .into_iter()
            .map(|profile| (profile.user_id, profile.display_name))
            .collect();

        Ok(conferences
            .into_iter()
            .map(|conference| ConferenceView {
                organizer_display_name: names.get(&conference.organizer_user_id).cloned(),
                conference,
            })
            .collect())
    }

    async fn with_organizer(&self, conference: Conference) -> Result<ConferenceView, Error> {
        let organizer_display_name = self
            .profiles
            .find_by_user_id(&conference.organizer_user_id)
            .await
            .map_err(map_profile_error)?
            .map(|profile| profile.display_name);
        Ok(ConferenceView {
            conference,
            organizer_display_name,
        })
    }

    async fn submit(&self, job: BackgroundJob) {
        let name = job.name();
        if let Err(err) = self.jobs.submit(job).await {
            warn!(job = name, error = %err, "background job submission failed");
        }
    }

    async fn transition(
        &self,
        identity: &Identity,
        key: &ConferenceKey,
        change: RegistrationChange,
    ) -> Result<bool, Error> {
        self.registrations
            .transition(&Profile::for_identity(identity), key, change)
            .await
            .map_err(map_registration_error)
    }
}

#[async_trait]
impl<C, P, R, J> ConferenceCommand for ConferenceService<C, P, R, J>
where
    C: ConferenceRepository,
    P: ProfileRepository,
    R: RegistrationRepository,
    J: JobQueue,
{
    async fn create(
        &self,
        identity: &Identity,
        draft: ConferenceDraft,
    ) -> Result<ConferenceView, Error> {
        draft.validate()?;
        let organizer = self
            .profiles
            .insert_if_absent(&Profile::for_identity(identity))
            .await
            .map_err(map_profile_error)?;

        let conference = draft.into_conference(ConferenceKey::generate(), organizer.user_id);
        self.conferences
            .insert(&conference)
            .await
            .map_err(map_conference_error)?;

        self.submit(BackgroundJob::SendConfirmationEmail {
            email: identity.email().to_owned(),
            summary: conference_summary(&conference),
        })
        .await;

        Ok(ConferenceView {
            conference,
            organizer_display_name: Some(organizer.display_name),
        })
    }

    async fn update(
        &self,
        identity: &Identity,
        key: &ConferenceKey,
        update: ConferenceUpdate,
    ) -> Result<ConferenceView, Error> {
        update.validate()?;
        let conference = self
            .conferences
            .update(key, identity.user_id(), &update)
            .await
            .map_err(map_conference_error)?;
        self.with_organizer(conference).await
    }
}

#[async_trait]
impl<C, P, R, J> ConferenceQuery for ConferenceService<C, P, R, J>
where
    C: ConferenceRepository,
    P: ProfileRepository,
    R: RegistrationRepository,
    J: JobQueue,
{
    async fn get(&self, key: &ConferenceKey) -> Result<ConferenceView, Error> {
        let conference = self
            .conferences
            .find_by_key(key)
            .await
            .map_err(map_conference_error)?
            .ok_or_else(|| not_found(key))?;
        self.with_organizer(conference).await
    }

    async fn created_by(&self, identity: &Identity) -> Result<Vec<ConferenceView>, Error> {
        let conferences = self
            .conferences
            .find_by_organizer(identity.user_id())
            .await
            .map_err(map_conference_error)?;
        self.with_organizers(conferences).await
    }

    async fn search(&self, filters: Vec<RawFilter>) -> Result<Vec<ConferenceView>, Error> {
        let search = ConferenceSearch::from_filters(normalize_filters(&filters)?);
        let conferences = self
            .conferences
            .search(&search)
            .await
            .map_err(map_conference_error)?;
        self.with_organizers(conferences).await
    }

    async fn attending(&self, identity: &Identity) -> Result<Vec<ConferenceView>, Error> {
        let profile = self
            .profiles
            .insert_if_absent(&Profile::for_identity(identity))
            .await
            .map_err(map_profile_error)?;
        let conferences = self
            .conferences
            .find_by_keys(&profile.conference_keys_to_attend)
            .await
            .map_err(map_conference_error)?;
        self.with_organizers(conferences).await
    }
}

#[async_trait]
impl<C, P, R, J> RegistrationCommand for ConferenceService<C, P, R, J>
where
    C: ConferenceRepository,
    P: ProfileRepository,
    R: RegistrationRepository,
    J: JobQueue,
{
    async fn register(&self, identity: &Identity, key: &ConferenceKey) -> Result<bool, Error> {
        self.transition(identity, key, RegistrationChange::Register)
            .await
    }

    async fn unregister(&self, identity: &Identity, key: &ConferenceKey) -> Result<bool, Error> {
        self.transition(identity, key, RegistrationChange::Unregister)
            .await
    }
}

#[cfg(test)]
#[path = "conference_service_tests.rs"]
mod tests;
