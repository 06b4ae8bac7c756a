//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Profile};

/// Domain use-case port for fetching the caller's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the caller's profile, creating it on first access.
    async fn profile(&self, identity: &Identity) -> Result<Profile, Error>;
}
