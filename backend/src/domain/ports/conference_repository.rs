//! Port for conference persistence.
//!
//! Adapters store [`Conference`] records and execute [`ConferenceSearch`]
//! values. Updates are atomic: the ownership check and the write happen in
//! one transaction.

use async_trait::async_trait;

use crate::domain::{Conference, ConferenceKey, ConferenceSearch, ConferenceUpdate, UserId};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by conference repository adapters.
    pub enum ConferenceRepositoryError for "conference repository" {
        /// No conference exists for the key.
        NotFound { key: ConferenceKey } =>
            "No conference found with key: {key}",
        /// The caller does not organise the conference.
        NotOwner =>
            "Only the owner can update the conference.",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConferenceRepository: Send + Sync {
    /// Persist a new conference.
    async fn insert(&self, conference: &Conference) -> Result<(), ConferenceRepositoryError>;

    /// Fetch a conference by key.
    async fn find_by_key(
        &self,
        key: &ConferenceKey,
    ) -> Result<Option<Conference>, ConferenceRepositoryError>;

    /// Batch fetch, preserving the order of `keys` and skipping missing ones.
    async fn find_by_keys(
        &self,
        keys: &[ConferenceKey],
    ) -> Result<Vec<Conference>, ConferenceRepositoryError>;

    /// Conferences organised by `organizer`, ordered by name.
    async fn find_by_organizer(
        &self,
        organizer: &UserId,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError>;

    /// Execute a search.
    async fn search(
        &self,
        search: &ConferenceSearch,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError>;

    /// Apply `update` when `organizer` owns the conference.
    ///
    /// Fails with [`ConferenceRepositoryError::NotFound`] or
    /// [`ConferenceRepositoryError::NotOwner`] without writing anything.
    async fn update(
        &self,
        key: &ConferenceKey,
        organizer: &UserId,
        update: &ConferenceUpdate,
    ) -> Result<Conference, ConferenceRepositoryError>;

    /// Conferences with between one and `max_seats` seats left, by name.
    async fn find_nearly_sold_out(
        &self,
        max_seats: i32,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError>;
}
