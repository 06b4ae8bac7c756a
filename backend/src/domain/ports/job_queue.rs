//! Domain port describing fire-and-forget job submission.
use async_trait::async_trait;

use crate::domain::BackgroundJob;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the queue adapter.
    pub enum JobDispatchError {
        /// Queue infrastructure is unavailable.
        Unavailable { message: String } => "job queue is unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Hand `job` to the background worker without waiting for it to run.
    async fn submit(&self, job: BackgroundJob) -> Result<(), JobDispatchError>;
}
