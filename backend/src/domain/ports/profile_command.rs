//! Driving port for profile edits.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Profile, ProfileUpdate};

/// Domain use-case port for saving profile details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply `update` to the caller's profile.
    async fn save(&self, identity: &Identity, update: ProfileUpdate) -> Result<Profile, Error>;
}
