//! Port for profile persistence.
//!
//! Profiles are created lazily, so every mutating call takes the profile
//! that should be stored when none exists yet.

use async_trait::async_trait;

use crate::domain::{Profile, ProfileUpdate, SessionKey, UserId, WishlistRejection};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError for "profile repository" {
        /// The wishlist change was refused.
        Wishlist { rejection: WishlistRejection } => "{rejection}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Batch fetch; missing profiles are skipped.
    async fn find_by_user_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Store `seed` unless a profile already exists, returning the stored one.
    async fn insert_if_absent(&self, seed: &Profile) -> Result<Profile, ProfileRepositoryError>;

    /// Apply `update`, creating the profile from `seed` first if needed.
    async fn update_details(
        &self,
        seed: &Profile,
        update: &ProfileUpdate,
    ) -> Result<Profile, ProfileRepositoryError>;

    /// Append `key` to the wishlist atomically.
    async fn add_to_wishlist(
        &self,
        seed: &Profile,
        key: &SessionKey,
    ) -> Result<Profile, ProfileRepositoryError>;

    /// Remove `key` from the wishlist atomically.
    async fn remove_from_wishlist(
        &self,
        seed: &Profile,
        key: &SessionKey,
    ) -> Result<Profile, ProfileRepositoryError>;
}
