//! Cached announcement text.
//!
//! Two strings are served from the cache: a "last chance" notice listing
//! nearly sold out conferences, and the featured speaker banner. Both are
//! computed in the background and read back verbatim.

use crate::domain::{Conference, Session};

/// Cache key holding the nearly-sold-out notice.
pub const RECENT_ANNOUNCEMENTS_KEY: &str = "RECENT_ANNOUNCEMENTS";
/// Cache key holding the featured speaker banner.
pub const FEATURED_SPEAKER_KEY: &str = "FEATURED_SPEAKER";
/// Conferences with at most this many free seats (and at least one) are
/// announced.
pub const NEARLY_SOLD_OUT_SEATS: i32 = 5;

/// Whether `conference` belongs in the nearly-sold-out notice.
pub fn is_nearly_sold_out(conference: &Conference) -> bool {
    (1..=NEARLY_SOLD_OUT_SEATS).contains(&conference.seats_available)
}

/// Notice text for the given conferences, or `None` when there are none.
///
/// # Examples
/// ```
/// use conference_backend::domain::announcement_text;
///
/// assert_eq!(
///     announcement_text(["RustConf", "PyCon"]).as_deref(),
///     Some("Last chance to attend! The following conferences are nearly sold out: RustConf, PyCon"),
/// );
/// assert!(announcement_text(Vec::<&str>::new()).is_none());
/// ```
pub fn announcement_text<I, S>(names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<S> = names.into_iter().collect();
    if names.is_empty() {
        return None;
    }
    let joined = names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "Last chance to attend! The following conferences are nearly sold out: {joined}"
    ))
}

/// Banner for `speaker`, or `None` unless they present more than one session.
pub fn featured_speaker_text(speaker: &str, sessions: &[Session]) -> Option<String> {
    if sessions.len() < 2 {
        return None;
    }
    let mut text = format!("The featured speaker for this session is: {speaker}! Sessions:");
    for session in sessions {
        text.push(' ');
        text.push_str(&session.name);
    }
    Some(text)
}
