//! Mail adapter that writes messages to the log.
//!
//! No SMTP transport is wired up; confirmation mails are emitted as
//! structured log events and kept in a bounded outbox that tests and
//! operators can inspect.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ConfirmationMailer, MailerError};

const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// A message accepted by [`LogMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug)]
pub struct LogMailer {
    outbox: Mutex<VecDeque<SentMail>>,
    capacity: usize,
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` messages; the oldest are dropped first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outbox: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<SentMail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConfirmationMailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        info!(to, subject, body, "sending mail");
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| MailerError::delivery("outbox lock poisoned"))?;
        if self.capacity == 0 {
            return Ok(());
        }
        if outbox.len() == self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}
