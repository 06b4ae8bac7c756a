//! Shared wiring for integration tests.
//!
//! Builds the domain services over [`MemoryStore`] with a recording job
//! queue so tests can assert on queued work without a background worker.

pub mod embedded_postgres;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conference_backend::domain::ports::{
    FixtureLoginService, JobDispatchError, JobQueue,
};
use conference_backend::domain::{
    AnnouncementService, BackgroundJob, ConferenceService, ProfileService, SessionService,
};
use conference_backend::inbound::http::state::HttpState;
use conference_backend::outbound::cache::MemoryAnnouncementCache;
use conference_backend::outbound::memory::MemoryStore;

/// Job queue double that only records submissions.
#[derive(Debug, Default)]
pub struct RecordingJobQueue {
    jobs: Mutex<Vec<BackgroundJob>>,
}

impl RecordingJobQueue {
    pub fn jobs(&self) -> Vec<BackgroundJob> {
        self.jobs.lock().expect("job queue lock").clone()
    }
}

#[async_trait]
impl JobQueue for RecordingJobQueue {
    async fn submit(&self, job: BackgroundJob) -> Result<(), JobDispatchError> {
        self.jobs.lock().expect("job queue lock").push(job);
        Ok(())
    }
}

pub type TestConferenceService =
    ConferenceService<MemoryStore, MemoryStore, MemoryStore, RecordingJobQueue>;
pub type TestSessionService =
    SessionService<MemoryStore, MemoryStore, MemoryStore, RecordingJobQueue>;

/// Services and doubles sharing one in-memory store.
pub struct MemoryBackends {
    pub conferences: Arc<TestConferenceService>,
    pub sessions: Arc<TestSessionService>,
    pub profiles: Arc<ProfileService<MemoryStore>>,
    pub announcements: AnnouncementService<MemoryStore, MemoryStore, MemoryAnnouncementCache>,
    pub jobs: Arc<RecordingJobQueue>,
}

impl MemoryBackends {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let jobs = Arc::new(RecordingJobQueue::default());
        let conferences = Arc::new(ConferenceService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&jobs),
        ));
        let sessions = Arc::new(SessionService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&jobs),
        ));
        let profiles = Arc::new(ProfileService::new(Arc::clone(&store)));
        let announcements = AnnouncementService::new(
            Arc::clone(&store),
            store,
            Arc::new(MemoryAnnouncementCache::new()),
        );
        Self {
            conferences,
            sessions,
            profiles,
            announcements,
            jobs,
        }
    }

    /// Project the services onto the HTTP adapter's port set.
    pub fn http_state(&self) -> HttpState {
        HttpState {
            login: Arc::new(FixtureLoginService),
            profiles: self.profiles.clone(),
            profile_updates: self.profiles.clone(),
            conferences: self.conferences.clone(),
            conference_updates: self.conferences.clone(),
            registrations: self.conferences.clone(),
            sessions: self.sessions.clone(),
            session_updates: self.sessions.clone(),
            wishlist: self.sessions.clone(),
            wishlist_updates: self.sessions.clone(),
            announcements: Arc::new(self.announcements.clone()),
        }
    }
}
