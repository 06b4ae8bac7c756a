//! In-process storage adapter.
//!
//! [`MemoryStore`] keeps every record behind one async mutex, so each port
//! call, including the registration transaction, is serialised against all
//! others. It backs development runs without a database and the
//! integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    ConferenceRepository, ConferenceRepositoryError, ProfileRepository, ProfileRepositoryError,
    RegistrationRepository, RegistrationRepositoryError, SessionRepository,
    SessionRepositoryError,
};
use crate::domain::{
    Conference, ConferenceKey, ConferenceSearch, ConferenceUpdate, Profile, ProfileUpdate,
    RegistrationChange, Session, SessionFilter, SessionKey, UserId, apply_registration,
    session_order,
};

#[derive(Debug, Default)]
struct Records {
    conferences: HashMap<ConferenceKey, Conference>,
    profiles: HashMap<UserId, Profile>,
    sessions: HashMap<SessionKey, Session>,
}

impl Records {
    fn profile_entry(&mut self, seed: &Profile) -> &mut Profile {
        self.profiles
            .entry(seed.user_id.clone())
            .or_insert_with(|| seed.clone())
    }

    fn sorted_sessions<F>(&self, predicate: F) -> Vec<Session>
    where
        F: Fn(&Session) -> bool,
    {
        let mut sessions: Vec<Session> = self
            .sessions
            .values()
            .filter(|session| predicate(session))
            .cloned()
            .collect();
        sessions.sort_by(session_order);
        sessions
    }
}

/// Shared in-memory store implementing every repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConferenceRepository for MemoryStore {
    async fn insert(&self, conference: &Conference) -> Result<(), ConferenceRepositoryError> {
        let mut records = self.records.lock().await;
        records
            .conferences
            .insert(conference.key, conference.clone());
        Ok(())
    }

    async fn find_by_key(
        &self,
        key: &ConferenceKey,
    ) -> Result<Option<Conference>, ConferenceRepositoryError> {
        Ok(self.records.lock().await.conferences.get(key).cloned())
    }

    async fn find_by_keys(
        &self,
        keys: &[ConferenceKey],
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let records = self.records.lock().await;
        Ok(keys
            .iter()
            .filter_map(|key| records.conferences.get(key).cloned())
            .collect())
    }

    async fn find_by_organizer(
        &self,
        organizer: &UserId,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let records = self.records.lock().await;
        let owned = records
            .conferences
            .values()
            .filter(|conference| conference.is_organised_by(organizer));
        Ok(ConferenceSearch::all().apply(owned))
    }

    async fn search(
        &self,
        search: &ConferenceSearch,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let records = self.records.lock().await;
        Ok(search.apply(records.conferences.values()))
    }

    async fn update(
        &self,
        key: &ConferenceKey,
        organizer: &UserId,
        update: &ConferenceUpdate,
    ) -> Result<Conference, ConferenceRepositoryError> {
        let mut records = self.records.lock().await;
        let conference = records
            .conferences
            .get_mut(key)
            .ok_or_else(|| ConferenceRepositoryError::not_found(*key))?;
        if !conference.is_organised_by(organizer) {
            return Err(ConferenceRepositoryError::not_owner());
        }
        update.apply_to(conference);
        Ok(conference.clone())
    }

    async fn find_nearly_sold_out(
        &self,
        max_seats: i32,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let records = self.records.lock().await;
        let nearly = records
            .conferences
            .values()
            .filter(|conference| (1..=max_seats).contains(&conference.seats_available));
        Ok(ConferenceSearch::all().apply(nearly))
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.records.lock().await.profiles.get(user_id).cloned())
    }

    async fn find_by_user_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let records = self.records.lock().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| records.profiles.get(id).cloned())
            .collect())
    }

    async fn insert_if_absent(&self, seed: &Profile) -> Result<Profile, ProfileRepositoryError> {
        let mut records = self.records.lock().await;
        Ok(records.profile_entry(seed).clone())
    }

    async fn update_details(
        &self,
        seed: &Profile,
        update: &ProfileUpdate,
    ) -> Result<Profile, ProfileRepositoryError> {
        let mut records = self.records.lock().await;
        let profile = records.profile_entry(seed);
        update.apply_to(profile);
        Ok(profile.clone())
    }

    async fn add_to_wishlist(
        &self,
        seed: &Profile,
        key: &SessionKey,
    ) -> Result<Profile, ProfileRepositoryError> {
        let mut records = self.records.lock().await;
        let profile = records.profile_entry(seed);
        profile
            .add_to_wishlist(*key)
            .map_err(ProfileRepositoryError::wishlist)?;
        Ok(profile.clone())
    }

    async fn remove_from_wishlist(
        &self,
        seed: &Profile,
        key: &SessionKey,
    ) -> Result<Profile, ProfileRepositoryError> {
        let mut records = self.records.lock().await;
        let profile = records.profile_entry(seed);
        profile
            .remove_from_wishlist(key)
            .map_err(ProfileRepositoryError::wishlist)?;
        Ok(profile.clone())
    }
}

#[async_trait]
impl RegistrationRepository for MemoryStore {
    async fn transition(
        &self,
        seed: &Profile,
        key: &ConferenceKey,
        change: RegistrationChange,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut records = self.records.lock().await;
        let Some(mut conference) = records.conferences.get(key).cloned() else {
            return Err(RegistrationRepositoryError::conference_not_found(*key));
        };
        let mut profile = records.profile_entry(seed).clone();

        let changed = apply_registration(change, &mut profile, &mut conference)
            .map_err(RegistrationRepositoryError::rejected)?;

        records.profiles.insert(profile.user_id.clone(), profile);
        records.conferences.insert(conference.key, conference);
        Ok(changed)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let mut records = self.records.lock().await;
        records.sessions.insert(session.key, session.clone());
        Ok(())
    }

    async fn find_by_key(
        &self,
        key: &SessionKey,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        Ok(self.records.lock().await.sessions.get(key).cloned())
    }

    async fn find_by_keys(
        &self,
        keys: &[SessionKey],
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        let records = self.records.lock().await;
        Ok(keys
            .iter()
            .filter_map(|key| records.sessions.get(key).cloned())
            .collect())
    }

    async fn find_by_conference(
        &self,
        conference_key: &ConferenceKey,
        filter: &SessionFilter,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        let records = self.records.lock().await;
        Ok(records.sorted_sessions(|session| {
            &session.conference_key == conference_key && filter.matches(session)
        }))
    }

    async fn find_by_speaker(&self, speaker: &str) -> Result<Vec<Session>, SessionRepositoryError> {
        let records = self.records.lock().await;
        Ok(records.sorted_sessions(|session| session.speaker == speaker))
    }
}
