//! Driving port for seat registration.

use async_trait::async_trait;

use crate::domain::{ConferenceKey, Error, Identity};

/// Domain use-case port for registering and unregistering.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Take a seat. Returns `true` on success.
    async fn register(&self, identity: &Identity, key: &ConferenceKey) -> Result<bool, Error>;

    /// Give a seat back. Returns `false` when the caller was not registered.
    async fn unregister(&self, identity: &Identity, key: &ConferenceKey) -> Result<bool, Error>;
}
