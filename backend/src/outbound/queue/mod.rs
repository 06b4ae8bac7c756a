//! In-process job queue adapter.
//!
//! [`InProcessJobQueue`] pushes jobs onto an unbounded Tokio channel drained
//! by a single worker task. Submission never waits for execution. The
//! submitter's trace id travels with each job and is put back in scope while
//! the job runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::ports::{JobDispatchError, JobHandler, JobQueue};
use crate::domain::{BackgroundJob, TraceId};

struct Envelope {
    trace_id: Option<TraceId>,
    job: BackgroundJob,
}

/// Queue handle shared by request handlers.
#[derive(Debug, Clone)]
pub struct InProcessJobQueue {
    sender: UnboundedSender<Envelope>,
}

impl InProcessJobQueue {
    /// Create a queue and spawn its worker on the current runtime.
    ///
    /// The worker stops once every queue handle has been dropped.
    pub fn spawn<H>(handler: Arc<H>) -> (Self, JoinHandle<()>)
    where
        H: JobHandler + ?Sized + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(handler, receiver));
        (Self { sender }, worker)
    }
}

async fn run_worker<H>(handler: Arc<H>, mut receiver: UnboundedReceiver<Envelope>)
where
    H: JobHandler + ?Sized,
{
    while let Some(Envelope { trace_id, job }) = receiver.recv().await {
        let name = job.name();
        let trace_id = trace_id.unwrap_or_else(TraceId::generate);
        let result = TraceId::scope(trace_id, handler.handle(job)).await;
        if let Err(err) = result {
            error!(job = name, %trace_id, error = %err, "background job failed");
        }
    }
    info!("job queue closed; worker exiting");
}

#[async_trait]
impl JobQueue for InProcessJobQueue {
    async fn submit(&self, job: BackgroundJob) -> Result<(), JobDispatchError> {
        self.sender
            .send(Envelope {
                trace_id: TraceId::current(),
                job,
            })
            .map_err(|err| JobDispatchError::unavailable(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::Error;
    use rstest::rstest;

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<(String, Option<TraceId>)>>,
    }

    #[async_trait]
    impl JobHandler for RecordingHandler {
        async fn handle(&self, job: BackgroundJob) -> Result<(), Error> {
            self.seen
                .lock()
                .expect("handler lock")
                .push((job.name().to_owned(), TraceId::current()));
            if matches!(job, BackgroundJob::RefreshAnnouncement) {
                return Err(Error::internal("refresh failed"));
            }
            Ok(())
        }
    }

    #[rstest]
    #[tokio::test]
    async fn jobs_run_in_order_with_the_submitter_trace_id() {
        let handler = Arc::new(RecordingHandler::default());
        let (queue, worker) = InProcessJobQueue::spawn(Arc::clone(&handler));
        let trace_id = TraceId::generate();

        TraceId::scope(trace_id, async {
            queue
                .submit(BackgroundJob::RefreshAnnouncement)
                .await
                .expect("submit");
            queue
                .submit(BackgroundJob::SetFeaturedSpeaker {
                    speaker: "Grace".to_owned(),
                })
                .await
                .expect("submit");
        })
        .await;
        drop(queue);
        worker.await.expect("worker exits cleanly");

        let seen = handler.seen.lock().expect("handler lock");
        assert_eq!(
            *seen,
            vec![
                ("refresh_announcement".to_owned(), Some(trace_id)),
                ("set_featured_speaker".to_owned(), Some(trace_id)),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn submit_fails_once_the_worker_is_gone() {
        let handler = Arc::new(RecordingHandler::default());
        let (queue, worker) = InProcessJobQueue::spawn(handler);
        worker.abort();
        let _ = worker.await;

        let err = queue
            .submit(BackgroundJob::RefreshAnnouncement)
            .await
            .expect_err("receiver dropped");
        assert!(matches!(err, JobDispatchError::Unavailable { .. }));
    }
}
