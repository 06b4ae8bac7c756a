//! Driving port for cached announcement text.

use async_trait::async_trait;

use crate::domain::Error;

/// Domain use-case port for reading cached banners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementQuery: Send + Sync {
    /// Nearly-sold-out notice, or an empty string.
    async fn announcement(&self) -> Result<String, Error>;

    /// Featured speaker banner, or an empty string.
    async fn featured_speaker(&self) -> Result<String, Error>;
}
