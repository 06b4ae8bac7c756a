//! Driving port for wishlist reads.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Session};

/// Domain use-case port for listing bookmarked sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistQuery: Send + Sync {
    /// Sessions in the caller's wishlist, in the order they were added.
    async fn sessions(&self, identity: &Identity) -> Result<Vec<Session>, Error>;
}
