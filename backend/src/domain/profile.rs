//! User profile aggregate.
//!
//! A profile is created lazily the first time an identity touches a
//! profile-backed operation. It tracks the conferences the user attends and
//! the sessions saved to their wishlist, both as ordered key lists.

use std::fmt;
use std::str::FromStr;

use crate::domain::{ConferenceKey, Identity, SessionKey, UserId};

/// Preferred tee-shirt size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TeeShirtSize {
    #[default]
    NotSpecified,
    XsM,
    XsW,
    SM,
    SW,
    MM,
    MW,
    LM,
    LW,
    XlM,
    XlW,
    XxlM,
    XxlW,
    XxxlM,
    XxxlW,
}

const TEE_SHIRT_SIZES: [TeeShirtSize; 15] = [
    TeeShirtSize::NotSpecified,
    TeeShirtSize::XsM,
    TeeShirtSize::XsW,
    TeeShirtSize::SM,
    TeeShirtSize::SW,
    TeeShirtSize::MM,
    TeeShirtSize::MW,
    TeeShirtSize::LM,
    TeeShirtSize::LW,
    TeeShirtSize::XlM,
    TeeShirtSize::XlW,
    TeeShirtSize::XxlM,
    TeeShirtSize::XxlW,
    TeeShirtSize::XxxlM,
    TeeShirtSize::XxxlW,
];

impl TeeShirtSize {
    /// Wire and storage representation.
    ///
    /// # Examples
    /// ```
    /// use conference_backend::domain::TeeShirtSize;
    ///
    /// assert_eq!(TeeShirtSize::default().as_str(), "NOT_SPECIFIED");
    /// assert_eq!(TeeShirtSize::XxlW.as_str(), "XXL_W");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSpecified => "NOT_SPECIFIED",
            Self::XsM => "XS_M",
            Self::XsW => "XS_W",
            Self::SM => "S_M",
            Self::SW => "S_W",
            Self::MM => "M_M",
            Self::MW => "M_W",
            Self::LM => "L_M",
            Self::LW => "L_W",
            Self::XlM => "XL_M",
            Self::XlW => "XL_W",
            Self::XxlM => "XXL_M",
            Self::XxlW => "XXL_W",
            Self::XxxlM => "XXXL_M",
            Self::XxxlW => "XXXL_W",
        }
    }
}

impl fmt::Display for TeeShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tee-shirt size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTeeShirtSizeError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseTeeShirtSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tee-shirt size: {}", self.input)
    }
}

impl std::error::Error for ParseTeeShirtSizeError {}

impl FromStr for TeeShirtSize {
    type Err = ParseTeeShirtSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TEE_SHIRT_SIZES
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ParseTeeShirtSizeError {
                input: s.to_owned(),
            })
    }
}

/// Reasons a wishlist mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WishlistRejection {
    /// The session key is already listed.
    #[error("This session is already in your wishlist")]
    AlreadyInWishlist,
    /// The session key is not listed.
    #[error("This session is not in your wishlist")]
    NotInWishlist,
}

/// Per-user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    pub conference_keys_to_attend: Vec<ConferenceKey>,
    pub session_keys_in_wishlist: Vec<SessionKey>,
}

impl Profile {
    /// Initial profile for a first-time caller.
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id().clone(),
            display_name: identity.nickname().to_owned(),
            main_email: identity.email().to_owned(),
            tee_shirt_size: TeeShirtSize::NotSpecified,
            conference_keys_to_attend: Vec::new(),
            session_keys_in_wishlist: Vec::new(),
        }
    }

    /// Whether the profile is registered for `key`.
    pub fn is_attending(&self, key: &ConferenceKey) -> bool {
        self.conference_keys_to_attend.contains(key)
    }

    /// Append `key` to the wishlist unless it is already present.
    pub fn add_to_wishlist(&mut self, key: SessionKey) -> Result<(), WishlistRejection> {
        if self.session_keys_in_wishlist.contains(&key) {
            return Err(WishlistRejection::AlreadyInWishlist);
        }
        self.session_keys_in_wishlist.push(key);
        Ok(())
    }

    /// Remove `key` from the wishlist.
    pub fn remove_from_wishlist(&mut self, key: &SessionKey) -> Result<(), WishlistRejection> {
        let before = self.session_keys_in_wishlist.len();
        self.session_keys_in_wishlist.retain(|k| k != key);
        if self.session_keys_in_wishlist.len() == before {
            return Err(WishlistRejection::NotInWishlist);
        }
        Ok(())
    }
}

/// Editable profile fields.
///
/// `None` and blank display names leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub tee_shirt_size: Option<TeeShirtSize>,
}

impl ProfileUpdate {
    /// Copy supplied fields onto `profile`.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = self
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
        {
            profile.display_name = name.to_owned();
        }
        if let Some(size) = self.tee_shirt_size {
            profile.tee_shirt_size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile() -> Profile {
        let identity = Identity::from_email("ada@example.com").expect("identity");
        Profile::for_identity(&identity)
    }

    #[rstest]
    fn new_profile_uses_identity(profile: Profile) {
        assert_eq!(profile.display_name, "ada");
        assert_eq!(profile.main_email, "ada@example.com");
        assert_eq!(profile.tee_shirt_size, TeeShirtSize::NotSpecified);
        assert!(profile.conference_keys_to_attend.is_empty());
    }

    #[rstest]
    fn tee_shirt_sizes_parse_their_own_output() {
        for size in TEE_SHIRT_SIZES {
            assert_eq!(size.as_str().parse::<TeeShirtSize>(), Ok(size));
        }
        assert!("XXXXL".parse::<TeeShirtSize>().is_err());
    }

    #[rstest]
    fn wishlist_rejects_duplicates(mut profile: Profile) {
        let key = SessionKey::generate();
        profile.add_to_wishlist(key).expect("first add");
        assert_eq!(
            profile.add_to_wishlist(key),
            Err(WishlistRejection::AlreadyInWishlist)
        );
        assert_eq!(profile.session_keys_in_wishlist, vec![key]);
    }

    #[rstest]
    fn wishlist_removal_requires_presence(mut profile: Profile) {
        let key = SessionKey::generate();
        assert_eq!(
            profile.remove_from_wishlist(&key),
            Err(WishlistRejection::NotInWishlist)
        );
        profile.add_to_wishlist(key).expect("add");
        profile.remove_from_wishlist(&key).expect("remove");
        assert!(profile.session_keys_in_wishlist.is_empty());
    }

    #[rstest]
    fn update_skips_blank_display_name(mut profile: Profile) {
        ProfileUpdate {
            display_name: Some(" ".to_owned()),
            tee_shirt_size: Some(TeeShirtSize::MW),
        }
        .apply_to(&mut profile);
        assert_eq!(profile.display_name, "ada");
        assert_eq!(profile.tee_shirt_size, TeeShirtSize::MW);
    }
}
