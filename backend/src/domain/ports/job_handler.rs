//! Driving port invoked by the background worker for each job.

use async_trait::async_trait;

use crate::domain::{BackgroundJob, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Execute one job to completion.
    async fn handle(&self, job: BackgroundJob) -> Result<(), Error>;
}
