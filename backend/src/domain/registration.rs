//! Seat registration state machine.
//!
//! [`apply_registration`] is the only place that moves a (profile,
//! conference) pair between [`RegistrationState`]s. Repositories call it
//! while holding both records inside one transaction and persist both
//! records only when it returns `Ok`.

#![deny(missing_docs)]

use crate::domain::{Conference, Error, Profile};

/// Requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationChange {
    /// Claim a seat.
    Register,
    /// Give a seat back.
    Unregister,
}

/// Registration status of one user for one conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// The conference is not in the profile's attendance list.
    NotRegistered,
    /// The profile holds one seat.
    Registered,
}

impl RegistrationState {
    /// Current state of `profile` for `conference`.
    pub fn of(profile: &Profile, conference: &Conference) -> Self {
        if profile.is_attending(&conference.key) {
            Self::Registered
        } else {
            Self::NotRegistered
        }
    }
}

/// Reasons a registration is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationRejection {
    /// The profile already holds a seat.
    #[error("You have already registered for this conference")]
    AlreadyRegistered,
    /// `seats_available` is zero.
    #[error("There are no seats available.")]
    NoSeatsAvailable,
}

impl From<RegistrationRejection> for Error {
    fn from(value: RegistrationRejection) -> Self {
        Error::conflict(value.to_string())
    }
}

/// Apply `change` to the pair, returning whether anything changed.
///
/// Both records are left untouched when the change is rejected.
/// Unregistering a user who is not registered is a no-op returning `false`.
///
/// # Examples
/// ```
/// use conference_backend::domain::{
///     apply_registration, ConferenceDraft, ConferenceKey, Identity, Profile,
///     RegistrationChange,
/// };
///
/// let identity = Identity::from_email("ada@example.com").unwrap();
/// let mut profile = Profile::for_identity(&identity);
/// let mut conference = ConferenceDraft {
///     name: "RustConf".into(),
///     max_attendees: Some(1),
///     ..ConferenceDraft::default()
/// }
/// .into_conference(ConferenceKey::generate(), identity.user_id().clone());
///
/// assert_eq!(
///     apply_registration(RegistrationChange::Register, &mut profile, &mut conference),
///     Ok(true)
/// );
/// assert_eq!(conference.seats_available, 0);
/// ```
pub fn apply_registration(
    change: RegistrationChange,
    profile: &mut Profile,
    conference: &mut Conference,
) -> Result<bool, RegistrationRejection> {
    let state = RegistrationState::of(profile, conference);
    match (change, state) {
        (RegistrationChange::Register, RegistrationState::Registered) => {
            Err(RegistrationRejection::AlreadyRegistered)
        }
        (RegistrationChange::Register, RegistrationState::NotRegistered) => {
            if conference.seats_available <= 0 {
                return Err(RegistrationRejection::NoSeatsAvailable);
            }
            profile.conference_keys_to_attend.push(conference.key);
            conference.seats_available -= 1;
            Ok(true)
        }
        (RegistrationChange::Unregister, RegistrationState::Registered) => {
            profile
                .conference_keys_to_attend
                .retain(|key| key != &conference.key);
            conference.seats_available += 1;
            Ok(true)
        }
        (RegistrationChange::Unregister, RegistrationState::NotRegistered) => Ok(false),
    }
}
