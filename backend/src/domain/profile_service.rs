//! Profile domain service.
//!
//! Implements the profile driving ports. Every call seeds the repository
//! with [`Profile::for_identity`] so first-time callers get a profile
//! without a separate sign-up step.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError};
use crate::domain::{Error, Identity, Profile, ProfileUpdate, WishlistRejection};

/// Translate profile repository failures into domain errors.
pub(crate) fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Wishlist { rejection } => match rejection {
            WishlistRejection::AlreadyInWishlist => Error::conflict(rejection.to_string()),
            WishlistRejection::NotInWishlist => Error::not_found(rejection.to_string()),
        },
        other => other.into_domain_error(),
    }
}

/// Profile service implementing [`ProfileQuery`] and [`ProfileCommand`].
#[derive(Clone)]
pub struct ProfileService<P> {
    profiles: Arc<P>,
}

impl<P> ProfileService<P> {
    /// Create a new service over the given repository.
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl<P> ProfileQuery for ProfileService<P>
where
    P: ProfileRepository,
{
    async fn profile(&self, identity: &Identity) -> Result<Profile, Error> {
        self.profiles
            .insert_if_absent(&Profile::for_identity(identity))
            .await
            .map_err(map_profile_error)
    }
}

#[async_trait]
impl<P> ProfileCommand for ProfileService<P>
where
    P: ProfileRepository,
{
    async fn save(&self, identity: &Identity, update: ProfileUpdate) -> Result<Profile, Error> {
        self.profiles
            .update_details(&Profile::for_identity(identity), &update)
            .await
            .map_err(map_profile_error)
    }
}
