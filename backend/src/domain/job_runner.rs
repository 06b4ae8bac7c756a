//! Executes background jobs pulled off the queue.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AnnouncementCache, ConferenceRepository, ConfirmationMailer, JobHandler, MailerError,
    SessionRepository,
};
use crate::domain::{AnnouncementService, BackgroundJob, Error};

/// Subject line of the organiser confirmation e-mail.
pub const CONFIRMATION_SUBJECT: &str = "You created a new Conference!";

/// [`JobHandler`] dispatching each job to the owning service.
pub struct JobRunner<C, S, K: ?Sized, M> {
    announcements: AnnouncementService<C, S, K>,
    mailer: Arc<M>,
}

impl<C, S, K: ?Sized, M> JobRunner<C, S, K, M> {
    pub fn new(announcements: AnnouncementService<C, S, K>, mailer: Arc<M>) -> Self {
        Self {
            announcements,
            mailer,
        }
    }
}

fn map_mailer_error(error: MailerError) -> Error {
    match error {
        MailerError::Delivery { message } => {
            Error::service_unavailable(format!("mailer unavailable: {message}"))
        }
    }
}

#[async_trait]
impl<C, S, K: ?Sized, M> JobHandler for JobRunner<C, S, K, M>
where
    C: ConferenceRepository,
    S: SessionRepository,
    K: AnnouncementCache,
    M: ConfirmationMailer,
{
    async fn handle(&self, job: BackgroundJob) -> Result<(), Error> {
        info!(job = job.name(), "running background job");
        match job {
            BackgroundJob::SendConfirmationEmail { email, summary } => self
                .mailer
                .send(&email, CONFIRMATION_SUBJECT, &summary)
                .await
                .map_err(map_mailer_error),
            BackgroundJob::SetFeaturedSpeaker { speaker } => self
                .announcements
                .set_featured_speaker(&speaker)
                .await
                .map(|_| ()),
            BackgroundJob::RefreshAnnouncement => {
                self.announcements.refresh_announcement().await.map(|_| ())
            }
        }
    }
}
