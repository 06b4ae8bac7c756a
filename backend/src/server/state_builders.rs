//! Builders wiring repositories, services and the job queue into
//! [`HttpState`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use conference_backend::domain::ports::{
    AnnouncementCache, ConferenceRepository, FixtureLoginService, JobQueue, ProfileRepository,
    RegistrationRepository, SessionRepository,
};
use conference_backend::domain::{
    AnnouncementService, BackgroundJob, ConferenceService, JobRunner, ProfileService,
    SessionService,
};
use conference_backend::inbound::http::state::HttpState;
use conference_backend::outbound::cache::MemoryAnnouncementCache;
use conference_backend::outbound::mailer::LogMailer;
use conference_backend::outbound::memory::MemoryStore;
use conference_backend::outbound::persistence::{
    DbPool, DieselConferenceRepository, DieselProfileRepository, DieselRegistrationRepository,
    DieselSessionRepository,
};
use conference_backend::outbound::queue::InProcessJobQueue;

use super::ServerConfig;

/// Everything the HTTP workers and the refresh timer share.
pub(crate) struct Backends {
    pub(crate) http_state: HttpState,
    pub(crate) jobs: InProcessJobQueue,
}

/// Pick the storage and cache adapters named by `config` and wire the
/// services over them.
///
/// Must be called from within a Tokio runtime because the job worker is
/// spawned immediately.
pub(crate) fn build_backends(config: &ServerConfig) -> Backends {
    let cache: Arc<dyn AnnouncementCache> = match &config.redis_cache {
        Some(redis) => Arc::new(redis.clone()),
        None => Arc::new(MemoryAnnouncementCache::new()),
    };
    match &config.db_pool {
        Some(pool) => diesel_backends(pool, cache),
        None => memory_backends(cache),
    }
}

fn diesel_backends(pool: &DbPool, cache: Arc<dyn AnnouncementCache>) -> Backends {
    info!("using PostgreSQL repositories");
    wire(
        Arc::new(DieselConferenceRepository::new(pool.clone())),
        Arc::new(DieselProfileRepository::new(pool.clone())),
        Arc::new(DieselRegistrationRepository::new(pool.clone())),
        Arc::new(DieselSessionRepository::new(pool.clone())),
        cache,
    )
}

pub(crate) fn memory_backends(cache: Arc<dyn AnnouncementCache>) -> Backends {
    info!("using in-memory repositories");
    let store = Arc::new(MemoryStore::new());
    wire(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        store,
        cache,
    )
}

fn wire<C, P, R, S>(
    conferences: Arc<C>,
    profiles: Arc<P>,
    registrations: Arc<R>,
    sessions: Arc<S>,
    cache: Arc<dyn AnnouncementCache>,
) -> Backends
where
    C: ConferenceRepository + 'static,
    P: ProfileRepository + 'static,
    R: RegistrationRepository + 'static,
    S: SessionRepository + 'static,
{
    let announcements =
        AnnouncementService::new(Arc::clone(&conferences), Arc::clone(&sessions), cache);
    let runner = Arc::new(JobRunner::new(
        announcements.clone(),
        Arc::new(LogMailer::new()),
    ));
    // The worker runs until the last queue handle is dropped.
    let (queue, _worker) = InProcessJobQueue::spawn(runner);
    let jobs = Arc::new(queue.clone());

    let conference_service = Arc::new(ConferenceService::new(
        Arc::clone(&conferences),
        Arc::clone(&profiles),
        registrations,
        Arc::clone(&jobs),
    ));
    let profile_service = Arc::new(ProfileService::new(Arc::clone(&profiles)));
    let session_service = Arc::new(SessionService::new(sessions, conferences, profiles, jobs));

    let http_state = HttpState {
        login: Arc::new(FixtureLoginService),
        profiles: profile_service.clone(),
        profile_updates: profile_service,
        conferences: conference_service.clone(),
        conference_updates: conference_service.clone(),
        registrations: conference_service,
        sessions: session_service.clone(),
        session_updates: session_service.clone(),
        wishlist: session_service.clone(),
        wishlist_updates: session_service,
        announcements: Arc::new(announcements),
    };
    Backends {
        http_state,
        jobs: queue,
    }
}

/// Queue an announcement refresh now and then every `period`.
pub(crate) fn spawn_announcement_refresh(
    jobs: InProcessJobQueue,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(err) = jobs.submit(BackgroundJob::RefreshAnnouncement).await {
                warn!(error = %err, "announcement refresh not queued; stopping timer");
                break;
            }
        }
    })
}
