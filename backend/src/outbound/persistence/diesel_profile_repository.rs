//! PostgreSQL-backed `ProfileRepository`.
//!
//! Every mutation seeds the row with `INSERT .. ON CONFLICT DO NOTHING`,
//! then locks it with `SELECT .. FOR UPDATE` before writing, so concurrent
//! wishlist edits for one user never lose each other's changes.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileUpdate, SessionKey, UserId, WishlistRejection};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

/// Insert `seed` unless a row for the user already exists.
pub(crate) async fn seed_profile(
    conn: &mut AsyncPgConnection,
    seed: &Profile,
) -> Result<(), diesel::result::Error> {
    diesel::insert_into(profiles::table)
        .values(&ProfileRow::from(seed))
        .on_conflict(profiles::user_id)
        .do_nothing()
        .execute(conn)
        .await
        .map(|_| ())
}

/// Read the profile row for `user_id` under a row lock.
pub(crate) async fn lock_profile(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
) -> Result<Profile, diesel::result::Error> {
    profiles::table
        .find(user_id)
        .select(ProfileRow::as_select())
        .for_update()
        .first(conn)
        .await
        .map(Profile::from)
}

/// Write every column of `profile` back to its row.
pub(crate) async fn store_profile(
    conn: &mut AsyncPgConnection,
    profile: &Profile,
) -> Result<(), diesel::result::Error> {
    diesel::update(profiles::table.find(*profile.user_id.as_uuid()))
        .set(&ProfileRow::from(profile))
        .execute(conn)
        .await
        .map(|_| ())
}

impl DieselProfileRepository {
    /// Seed, lock, change and store a profile in one transaction.
    ///
    /// A rejected change commits nothing beyond the seed row.
    async fn mutate<F>(&self, seed: &Profile, change: F) -> Result<Profile, ProfileRepositoryError>
    where
        F: FnOnce(&mut Profile) -> Result<(), WishlistRejection> + Send + 'static,
    {
        let seed = seed.clone();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    seed_profile(conn, &seed).await?;
                    let mut profile = lock_profile(conn, *seed.user_id.as_uuid()).await?;
                    if let Err(rejection) = change(&mut profile) {
                        return Ok(Err(rejection));
                    }
                    store_profile(conn, &profile).await?;
                    Ok::<_, diesel::result::Error>(Ok(profile))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        outcome.map_err(ProfileRepositoryError::wishlist)
    }
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .find(user_id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Profile::from))
    }

    async fn find_by_user_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = user_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq_any(ids))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut by_id: HashMap<Uuid, Profile> = rows
            .into_iter()
            .map(|row| (row.user_id, Profile::from(row)))
            .collect();
        Ok(user_ids
            .iter()
            .filter_map(|id| by_id.remove(id.as_uuid()))
            .collect())
    }

    async fn insert_if_absent(&self, seed: &Profile) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        seed_profile(&mut conn, seed)
            .await
            .map_err(map_diesel_error)?;
        let row: ProfileRow = profiles::table
            .find(seed.user_id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Profile::from(row))
    }

    async fn update_details(
        &self,
        seed: &Profile,
        update: &ProfileUpdate,
    ) -> Result<Profile, ProfileRepositoryError> {
        let update = update.clone();
        self.mutate(seed, move |profile| {
            update.apply_to(profile);
            Ok(())
        })
        .await
    }

    async fn add_to_wishlist(
        &self,
        seed: &Profile,
        key: &SessionKey,
    ) -> Result<Profile, ProfileRepositoryError> {
        let key = *key;
        self.mutate(seed, move |profile| profile.add_to_wishlist(key))
            .await
    }

    async fn remove_from_wishlist(
        &self,
        seed: &Profile,
        key: &SessionKey,
    ) -> Result<Profile, ProfileRepositoryError> {
        let key = *key;
        self.mutate(seed, move |profile| profile.remove_from_wishlist(&key))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_query_errors() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            ProfileRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_timeouts_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, ProfileRepositoryError::connection("timed out"));
    }
}
