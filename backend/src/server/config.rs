//! Server settings and the assembled server configuration.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use conference_backend::inbound::http::session_config::{
    SESSION_KEY_DEFAULT_PATH, SessionOptions, SessionSettings,
};
use conference_backend::outbound::cache::RedisAnnouncementCache;
use conference_backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REFRESH_SECS: u64 = 3600;

/// Start-up settings loaded from CLI flags, `CONFERENCE_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONFERENCE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Redis connection string. The in-process cache is used when unset.
    pub redis_url: Option<String>,
    /// Seconds between announcement refreshes.
    pub announcement_refresh_secs: Option<u64>,
    /// Path to the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie: Strict, Lax or None.
    pub same_site: Option<String>,
    /// Fall back to a generated session key when the key file is missing.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
}

impl ServerSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Return the announcement refresh period, falling back to one hour.
    ///
    /// A zero value is treated as one second so the interval timer stays
    /// valid.
    pub fn refresh_interval(&self) -> Duration {
        let secs = self
            .announcement_refresh_secs
            .unwrap_or(DEFAULT_REFRESH_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Project the session-related settings.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            key_file: self
                .session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH)),
            cookie_secure: self.cookie_secure,
            same_site: self.same_site.clone(),
            allow_ephemeral: self.allow_ephemeral_session_key,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) refresh_interval: Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_cache: Option<RedisAnnouncementCache>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            db_pool: None,
            redis_cache: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Store announcements in Redis instead of in process.
    #[must_use]
    pub fn with_redis_cache(mut self, cache: RedisAnnouncementCache) -> Self {
        self.redis_cache = Some(cache);
        self
    }

    /// Set how often the announcement refresh job is queued.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}
