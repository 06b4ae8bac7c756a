//! Port for the registration transaction.
//!
//! Registration spans a profile and a conference. Adapters lock both
//! records, run [`apply_registration`](crate::domain::apply_registration)
//! and persist both results, all inside one serialisable unit of work.

use async_trait::async_trait;

use crate::domain::{ConferenceKey, Profile, RegistrationChange, RegistrationRejection};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by registration adapters.
    pub enum RegistrationRepositoryError for "registration repository" {
        /// No conference exists for the key.
        ConferenceNotFound { key: ConferenceKey } =>
            "No conference found with key: {key}",
        /// The state machine refused the change.
        Rejected { rejection: RegistrationRejection } => "{rejection}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Apply `change` for the profile seeded by `seed` and the conference at
    /// `key`, returning whether anything changed.
    async fn transition(
        &self,
        seed: &Profile,
        key: &ConferenceKey,
        change: RegistrationChange,
    ) -> Result<bool, RegistrationRepositoryError>;
}
