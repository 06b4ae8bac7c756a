//! Port for the key-value cache holding announcement text.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum AnnouncementCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "announcement cache backend failure: {message}",
    }
}

/// String cache with no expiry guarantees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementCache: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, AnnouncementCacheError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), AnnouncementCacheError>;

    /// Remove `key`; absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), AnnouncementCacheError>;
}
