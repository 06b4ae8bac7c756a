//! PostgreSQL-backed `RegistrationRepository`.
//!
//! The conference row is locked before the profile row in every
//! transaction, so two registrations can never deadlock against each other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{
    Conference, ConferenceKey, Profile, RegistrationChange, RegistrationRejection,
    apply_registration,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_profile_repository::{lock_profile, seed_profile, store_profile};
use super::models::ConferenceRow;
use super::pool::{DbPool, PoolError};
use super::schema::conferences;

#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationRepositoryError {
    map_basic_pool_error(error, RegistrationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RegistrationRepositoryError {
    map_basic_diesel_error(
        error,
        RegistrationRepositoryError::query,
        RegistrationRepositoryError::connection,
    )
}

enum Transition {
    Applied(bool),
    MissingConference,
    Rejected(RegistrationRejection),
}

impl Transition {
    fn into_result(self, key: ConferenceKey) -> Result<bool, RegistrationRepositoryError> {
        match self {
            Self::Applied(changed) => Ok(changed),
            Self::MissingConference => Err(RegistrationRepositoryError::conference_not_found(key)),
            Self::Rejected(rejection) => Err(RegistrationRepositoryError::rejected(rejection)),
        }
    }
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn transition(
        &self,
        seed: &Profile,
        key: &ConferenceKey,
        change: RegistrationChange,
    ) -> Result<bool, RegistrationRepositoryError> {
        let seed = seed.clone();
        let conference_id = *key.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let transition = conn
            .transaction(|conn| {
                async move {
                    let row: Option<ConferenceRow> = conferences::table
                        .find(conference_id)
                        .select(ConferenceRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(Transition::MissingConference);
                    };
                    let mut conference = Conference::from(row);

                    seed_profile(conn, &seed).await?;
                    let mut profile = lock_profile(conn, *seed.user_id.as_uuid()).await?;

                    let changed = match apply_registration(change, &mut profile, &mut conference)
                    {
                        Ok(changed) => changed,
                        Err(rejection) => return Ok(Transition::Rejected(rejection)),
                    };
                    if changed {
                        diesel::update(conferences::table.find(conference_id))
                            .set(conferences::seats_available.eq(conference.seats_available))
                            .execute(conn)
                            .await?;
                        store_profile(conn, &profile).await?;
                    }
                    Ok::<_, diesel::result::Error>(Transition::Applied(changed))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        transition.into_result(*key)
    }
}
