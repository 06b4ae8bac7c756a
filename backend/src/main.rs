//! Backend entry-point: loads settings, connects adapters and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use conference_backend::inbound::http::health::HealthState;
use conference_backend::inbound::http::session_config::{BuildMode, session_settings};
use conference_backend::outbound::cache::RedisAnnouncementCache;
use conference_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_async};

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings(&settings.session_options(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let mut config =
        ServerConfig::new(session, bind_addr).with_refresh_interval(settings.refresh_interval());

    if let Some(database_url) = settings.database_url.clone() {
        let applied = run_pending_migrations_async(database_url.clone())
            .await
            .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
        info!(applied, "database migrations complete");
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    if let Some(redis_url) = settings.redis_url.as_deref() {
        let cache = RedisAnnouncementCache::connect(redis_url)
            .await
            .map_err(|e| std::io::Error::other(format!("redis cache failed: {e}")))?;
        config = config.with_redis_cache(cache);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "conference backend listening");
    server.await
}
