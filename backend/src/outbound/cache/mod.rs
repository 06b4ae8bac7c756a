//! Announcement cache adapters.
//!
//! [`RedisAnnouncementCache`] stores values in Redis through a `bb8-redis`
//! pool. [`MemoryAnnouncementCache`] keeps them in process for development
//! runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{AnnouncementCache, AnnouncementCacheError};

/// In-process cache backed by a map.
#[derive(Debug, Default)]
pub struct MemoryAnnouncementCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryAnnouncementCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnnouncementCache for MemoryAnnouncementCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AnnouncementCacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AnnouncementCacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AnnouncementCacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Redis-backed cache.
#[derive(Clone)]
pub struct RedisAnnouncementCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisAnnouncementCache {
    /// Build a pool for `redis_url`.
    ///
    /// Connections are opened lazily; a bad URL fails here, an unreachable
    /// server fails on first use.
    pub async fn connect(redis_url: &str) -> Result<Self, AnnouncementCacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| AnnouncementCacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| AnnouncementCacheError::backend(err.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn new(pool: Pool<RedisConnectionManager>) -> Self {
        Self { pool }
    }
}

fn map_redis_error<E: std::fmt::Display>(error: E) -> AnnouncementCacheError {
    debug!(error = %error, "redis command failed");
    AnnouncementCacheError::backend(error.to_string())
}

#[async_trait]
impl AnnouncementCache for RedisAnnouncementCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AnnouncementCacheError> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AnnouncementCacheError> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, key: &str) -> Result<(), AnnouncementCacheError> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        conn.del::<_, ()>(key).await.map_err(map_redis_error)
    }
}
