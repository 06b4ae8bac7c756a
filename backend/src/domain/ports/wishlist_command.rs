//! Driving port for wishlist edits.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Profile, SessionKey};

/// Domain use-case port for bookmarking sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistCommand: Send + Sync {
    /// Add an existing session to the caller's wishlist.
    async fn add(&self, identity: &Identity, key: &SessionKey) -> Result<Profile, Error>;

    /// Remove a session from the caller's wishlist.
    async fn remove(&self, identity: &Identity, key: &SessionKey) -> Result<Profile, Error>;
}
