//! Background jobs submitted by request handlers.

use std::fmt;

/// Work deferred to the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundJob {
    /// Tell an organiser their conference was created.
    SendConfirmationEmail { email: String, summary: String },
    /// Recompute the featured speaker banner for `speaker`.
    SetFeaturedSpeaker { speaker: String },
    /// Recompute the nearly-sold-out notice.
    RefreshAnnouncement,
}

impl BackgroundJob {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendConfirmationEmail { .. } => "send_confirmation_email",
            Self::SetFeaturedSpeaker { .. } => "set_featured_speaker",
            Self::RefreshAnnouncement => "refresh_announcement",
        }
    }
}

impl fmt::Display for BackgroundJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
